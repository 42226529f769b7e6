use crate::math::polygon_2d::vertex_centroid;
use crate::math::{Point2, Vector2};
use crate::model::{BuildingDescription, TextAlignment};

use super::prism::Projection;

/// Font size of a description's title line.
pub const TITLE_FONT_SIZE: f64 = 24.0;
/// Font size of every line after the title.
pub const BODY_FONT_SIZE: f64 = 12.0;

/// One laid-out label line.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionLine {
    pub text: String,
    pub font_size: f64,
    pub bold: bool,
    /// Vertical offset from the layout anchor.
    pub y_offset: f64,
}

/// Placement of a building label above its roof.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptionLayout {
    pub anchor: Point2,
    pub alignment: TextAlignment,
    pub lines: Vec<DescriptionLine>,
}

/// Roof-level point the description offset is measured from: the footprint's
/// vertex centroid lifted by `projection`.
#[must_use]
pub fn label_origin(footprint: &[Point2], projection: &Projection) -> Option<Point2> {
    vertex_centroid(footprint).map(|c| projection.project(&c))
}

/// Lays out a building description.
pub struct LayoutDescription<'a> {
    description: &'a BuildingDescription,
    footprint: &'a [Point2],
    projection: Projection,
}

impl<'a> LayoutDescription<'a> {
    #[must_use]
    pub fn new(
        description: &'a BuildingDescription,
        footprint: &'a [Point2],
        projection: Projection,
    ) -> Self {
        Self {
            description,
            footprint,
            projection,
        }
    }

    /// Executes the layout; `None` for an empty footprint.
    #[must_use]
    pub fn execute(&self) -> Option<DescriptionLayout> {
        let origin = label_origin(self.footprint, &self.projection)?;
        let text_lines: Vec<&str> = self.description.text.split('\n').collect();
        let bold_lines = if text_lines.len() > 2 { 2 } else { 1 };
        let direction = if self.description.reversed { -1.0 } else { 1.0 };

        let lines = text_lines
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let y_offset = if i == 0 {
                    0.0
                } else {
                    #[allow(clippy::cast_precision_loss)]
                    let stacked = i as f64 * BODY_FONT_SIZE;
                    let gap = if self.description.reversed {
                        0.0
                    } else {
                        BODY_FONT_SIZE
                    };
                    (stacked + gap) * direction
                };
                DescriptionLine {
                    text: text.to_owned(),
                    font_size: if i == 0 { TITLE_FONT_SIZE } else { BODY_FONT_SIZE },
                    bold: i < bold_lines,
                    y_offset,
                }
            })
            .collect();

        Some(DescriptionLayout {
            anchor: origin + self.description.offset,
            alignment: self.description.alignment,
            lines,
        })
    }
}

/// Offset to store after the label was dragged to `dragged`.
#[must_use]
pub fn offset_for_drag(
    footprint: &[Point2],
    projection: &Projection,
    dragged: &Point2,
) -> Option<Vector2> {
    label_origin(footprint, projection).map(|origin| dragged - origin)
}
