use serde::{Deserialize, Serialize};

use super::Ring;
use crate::error::{ModelError, Result};
use crate::math::{Point2, Vector2};

/// Default height given to freshly drawn buildings.
pub const DEFAULT_BUILDING_HEIGHT: f64 = 100.0;

/// Default stroke color given to freshly drawn buildings.
pub const DEFAULT_BUILDING_COLOR: &str = "#000000";

/// Horizontal anchoring of a building label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// Free text attached to a building and drawn above its roof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDescription {
    pub text: String,
    /// Offset of the label from the projected roof centroid.
    pub offset: Vector2,
    pub alignment: TextAlignment,
    /// Stack lines upwards instead of downwards.
    pub reversed: bool,
}

impl Default for BuildingDescription {
    fn default() -> Self {
        Self {
            text: String::new(),
            offset: Vector2::zeros(),
            alignment: TextAlignment::Center,
            reversed: false,
        }
    }
}

/// Identifier of an entry within its building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

/// A door marker, placed at an arc-length fraction around the footprint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: EntryId,
    /// Fraction of the perimeter in `[0, 1]`.
    pub position: f64,
}

/// Building-specific attributes of a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub height: f64,
    pub primary_color: String,
    pub secondary_color: Option<String>,
    pub description: Option<BuildingDescription>,
    pub entries: Vec<Entry>,
}

impl Default for Building {
    fn default() -> Self {
        Self {
            height: DEFAULT_BUILDING_HEIGHT,
            primary_color: DEFAULT_BUILDING_COLOR.to_owned(),
            secondary_color: None,
            description: None,
            entries: Vec::new(),
        }
    }
}

impl Building {
    /// Stroke color for a side face with the given alternating color index.
    ///
    /// Odd faces use the secondary color when one is set.
    #[must_use]
    pub fn face_color(&self, color_index: usize) -> &str {
        match (&self.secondary_color, color_index % 2) {
            (Some(secondary), 1) => secondary,
            _ => &self.primary_color,
        }
    }
}

/// What a polygon represents on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PolygonKind {
    Building(Building),
    Pavement,
}

/// A closed footprint ring with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub ring: Ring,
    pub kind: PolygonKind,
}

impl Polygon {
    /// A building with default height and color.
    #[must_use]
    pub fn building(ring: Ring) -> Self {
        Self {
            ring,
            kind: PolygonKind::Building(Building::default()),
        }
    }

    #[must_use]
    pub fn pavement(ring: Ring) -> Self {
        Self {
            ring,
            kind: PolygonKind::Pavement,
        }
    }

    #[must_use]
    pub fn as_building(&self) -> Option<&Building> {
        match &self.kind {
            PolygonKind::Building(b) => Some(b),
            PolygonKind::Pavement => None,
        }
    }

    #[must_use]
    pub fn is_pavement(&self) -> bool {
        matches!(self.kind, PolygonKind::Pavement)
    }
}

/// Ordered collection of polygons, addressed by index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolygonSet {
    polygons: Vec<Polygon>,
}

impl PolygonSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a polygon and returns its index.
    pub fn add(&mut self, polygon: Polygon) -> usize {
        self.polygons.push(polygon);
        let index = self.polygons.len() - 1;
        tracing::debug!(index, "polygon added");
        index
    }

    /// Returns the polygon at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::PolygonNotFound`] if the index is out of range.
    pub fn get(&self, index: usize) -> Result<&Polygon> {
        Ok(self
            .polygons
            .get(index)
            .ok_or(ModelError::PolygonNotFound(index))?)
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Polygon> {
        Ok(self
            .polygons
            .get_mut(index)
            .ok_or(ModelError::PolygonNotFound(index))?)
    }

    fn building_mut(&mut self, index: usize) -> Result<&mut Building> {
        match &mut self.get_mut(index)?.kind {
            PolygonKind::Building(b) => Ok(b),
            PolygonKind::Pavement => Err(ModelError::NotABuilding(index).into()),
        }
    }

    /// Deletes and returns the polygon at `index`; later indices shift down.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::PolygonNotFound`] if the index is out of range.
    pub fn remove(&mut self, index: usize) -> Result<Polygon> {
        if index >= self.polygons.len() {
            return Err(ModelError::PolygonNotFound(index).into());
        }
        tracing::debug!(index, "polygon removed");
        Ok(self.polygons.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Replaces one footprint vertex.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon or vertex does not exist.
    pub fn set_vertex(&mut self, index: usize, vertex: usize, point: Point2) -> Result<()> {
        self.get_mut(index)?
            .ring
            .set(vertex, point)
            .map_err(|_| ModelError::VertexNotFound {
                polygon: index,
                vertex,
            })?;
        Ok(())
    }

    /// Appends a vertex to a polygon's footprint.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::PolygonNotFound`] if the polygon does not exist.
    pub fn push_vertex(&mut self, index: usize, point: Point2) -> Result<()> {
        self.get_mut(index)?.ring.push(point);
        Ok(())
    }

    /// Moves a whole polygon by `delta`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::PolygonNotFound`] if the polygon does not exist.
    pub fn translate(&mut self, index: usize, delta: Vector2) -> Result<()> {
        self.get_mut(index)?.ring.translate(delta);
        Ok(())
    }

    /// Sets a building's extrusion height.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon does not exist or is not a building.
    pub fn set_height(&mut self, index: usize, height: f64) -> Result<()> {
        self.building_mut(index)?.height = height;
        Ok(())
    }

    /// Sets a building's primary and optional secondary stroke colors.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon does not exist or is not a building.
    pub fn set_colors(
        &mut self,
        index: usize,
        primary: impl Into<String>,
        secondary: Option<String>,
    ) -> Result<()> {
        let building = self.building_mut(index)?;
        building.primary_color = primary.into();
        building.secondary_color = secondary;
        Ok(())
    }

    /// Adds an entry at the start of the footprint and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon does not exist or is not a building.
    pub fn add_entry(&mut self, index: usize) -> Result<EntryId> {
        let building = self.building_mut(index)?;
        let id = EntryId(
            building
                .entries
                .iter()
                .map(|e| e.id.0 + 1)
                .max()
                .unwrap_or(0),
        );
        building.entries.push(Entry { id, position: 0.0 });
        Ok(id)
    }

    /// Moves an entry; the position is clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns an error if the building or entry does not exist.
    pub fn set_entry_position(&mut self, index: usize, id: EntryId, position: f64) -> Result<()> {
        let entry = self
            .building_mut(index)?
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ModelError::EntryNotFound(id.0))?;
        entry.position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        Ok(())
    }

    /// Removes an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the building or entry does not exist.
    pub fn remove_entry(&mut self, index: usize, id: EntryId) -> Result<()> {
        let entries = &mut self.building_mut(index)?.entries;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(ModelError::EntryNotFound(id.0).into());
        }
        Ok(())
    }

    /// Adds an empty centered description, or removes the existing one.
    /// Returns whether the building now has a description.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon does not exist or is not a building.
    pub fn toggle_description(&mut self, index: usize) -> Result<bool> {
        let building = self.building_mut(index)?;
        building.description = match building.description.take() {
            Some(_) => None,
            None => Some(BuildingDescription::default()),
        };
        Ok(building.description.is_some())
    }

    /// Replaces a building's description.
    ///
    /// # Errors
    ///
    /// Returns an error if the polygon does not exist or is not a building.
    pub fn set_description(
        &mut self,
        index: usize,
        description: Option<BuildingDescription>,
    ) -> Result<()> {
        self.building_mut(index)?.description = description;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a PolygonSet {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}
