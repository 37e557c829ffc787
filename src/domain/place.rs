//! Places and the categories used to style them

use thiserror::Error;

use super::geometry::GeoPoint;

/// A place marked on the map
#[derive(Clone, Debug, PartialEq)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub coordinates: GeoPoint,
    pub category_id: String,
    pub author: String,
    pub comment: String,
    pub is_favorite: bool,
    /// Imported from an external favourites list (drawn with a star)
    pub is_imported_favorite: bool,
}

/// Marker styling for a group of places
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    /// CSS-style hex colour, e.g. `#ef4444`
    pub color: String,
    pub icon: String,
}

impl Category {
    pub fn new(id: &str, name: &str, color: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

/// Look up a category by id
pub fn find_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("place name is required")]
    MissingName,
    #[error("a category must be chosen")]
    MissingCategory,
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    #[error("no position has been picked on the map")]
    MissingPosition,
}

/// Form input for a new place, before it has an id
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaceDraft {
    pub name: String,
    pub category_id: String,
    pub author: String,
    pub comment: String,
    pub position: Option<GeoPoint>,
}

impl PlaceDraft {
    /// Validate the draft and turn it into a place with the given id.
    ///
    /// Blank author and comment fall back to the supplied defaults.
    pub fn into_place(
        self,
        id: String,
        categories: &[Category],
        default_author: &str,
        default_comment: &str,
    ) -> Result<Place, DraftError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DraftError::MissingName);
        }
        if self.category_id.is_empty() {
            return Err(DraftError::MissingCategory);
        }
        if find_category(categories, &self.category_id).is_none() {
            return Err(DraftError::UnknownCategory(self.category_id));
        }
        let coordinates = self.position.ok_or(DraftError::MissingPosition)?;

        let author = match self.author.trim() {
            "" => default_author.to_string(),
            a => a.to_string(),
        };
        let comment = match self.comment.trim() {
            "" => default_comment.to_string(),
            c => c.to_string(),
        };

        Ok(Place {
            id,
            name: name.to_string(),
            coordinates,
            category_id: self.category_id,
            author,
            comment,
            is_favorite: false,
            is_imported_favorite: false,
        })
    }
}
