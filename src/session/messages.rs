//! Message types for the placeshare session
//!
//! This module contains:
//! - Msg enum with nested sub-enums for organized message handling
//! - Shortcut constructors used by the command parser and tests

use chrono::NaiveDate;

use crate::domain::{SharedMapTab, SurfaceSize};
use crate::widget::map_surface::PointerEvent;

// ============================================================================
// Map Surface Types
// ============================================================================

/// Messages driving the map surface
#[derive(Debug, Clone)]
pub enum MapMsg {
    /// Raw pointer input in surface pixels
    Pointer(PointerEvent),
    /// The surface was resized
    Resize(SurfaceSize),
    /// Print markers, the selection box and the region overlay
    Render,
    /// Drop the selected region and any pending address lookup
    ClearRegion,
}

// ============================================================================
// Place Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum PlaceMsg {
    /// Enter add mode; the next click picks the position
    StartAdding,
    /// Leave add mode without adding
    CancelAdding,
    /// Submit the add-place form; blank author and comment get defaults
    Submit {
        category_id: String,
        name: String,
        author: String,
        comment: String,
    },
    /// List places shown in the sidebar (filtered and in region)
    List,
    /// Close the place details panel
    Close,
}

/// Category filter messages
#[derive(Debug, Clone)]
pub enum FilterMsg {
    Toggle(String),
    SelectAll,
    DeselectAll,
}

// ============================================================================
// Sharing Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum ShareMsg {
    /// Build a link for the current region and filter
    Create,
    /// Restore a view from a link
    Open(String),
    /// Management list of shared maps, filtered by a search term and tab
    List { search: String, tab: SharedMapTab },
    ToggleActive(String),
    Delete(String),
}

// ============================================================================
// Meetup Types
// ============================================================================

#[derive(Debug, Clone)]
pub enum MeetupMsg {
    List,
    Create {
        meeting_date: NaiveDate,
        title: String,
        participants: String,
    },
    Suggest {
        meetup_id: String,
        name: String,
    },
    Vote {
        meetup_id: String,
        place_id: String,
        voter: String,
    },
    Say {
        meetup_id: String,
        author: String,
        text: String,
    },
}

// ============================================================================
// Main Message Enum
// ============================================================================

#[derive(Debug, Clone)]
pub enum Msg {
    Map(MapMsg),
    Place(PlaceMsg),
    Filter(FilterMsg),
    Share(ShareMsg),
    Meetup(MeetupMsg),
    Help,
    Quit,
}

impl Msg {
    // Pointer shortcuts
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::Map(MapMsg::Pointer(PointerEvent::down(x, y)))
    }
    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::Map(MapMsg::Pointer(PointerEvent::moved(x, y)))
    }
    pub fn pointer_up(x: f64, y: f64) -> Self {
        Self::Map(MapMsg::Pointer(PointerEvent::up(x, y)))
    }
    pub fn pointer_leave() -> Self {
        Self::Map(MapMsg::Pointer(PointerEvent::Leave))
    }
    pub fn resize(width: f64, height: f64) -> Self {
        Self::Map(MapMsg::Resize(SurfaceSize::new(width, height)))
    }
    pub fn render() -> Self {
        Self::Map(MapMsg::Render)
    }
    pub fn clear_region() -> Self {
        Self::Map(MapMsg::ClearRegion)
    }

    // Places
    pub fn start_adding() -> Self {
        Self::Place(PlaceMsg::StartAdding)
    }
    pub fn cancel_adding() -> Self {
        Self::Place(PlaceMsg::CancelAdding)
    }
    pub fn submit_place(category_id: &str, name: &str, author: &str, comment: &str) -> Self {
        Self::Place(PlaceMsg::Submit {
            category_id: category_id.to_string(),
            name: name.to_string(),
            author: author.to_string(),
            comment: comment.to_string(),
        })
    }
    pub fn list_places() -> Self {
        Self::Place(PlaceMsg::List)
    }
    pub fn close_place() -> Self {
        Self::Place(PlaceMsg::Close)
    }

    // Filter
    pub fn toggle_category(id: impl Into<String>) -> Self {
        Self::Filter(FilterMsg::Toggle(id.into()))
    }
    pub fn select_all_categories() -> Self {
        Self::Filter(FilterMsg::SelectAll)
    }
    pub fn deselect_all_categories() -> Self {
        Self::Filter(FilterMsg::DeselectAll)
    }

    // Sharing
    pub fn share() -> Self {
        Self::Share(ShareMsg::Create)
    }
    pub fn open_link(url: impl Into<String>) -> Self {
        Self::Share(ShareMsg::Open(url.into()))
    }
    pub fn shared_maps(search: impl Into<String>, tab: SharedMapTab) -> Self {
        Self::Share(ShareMsg::List {
            search: search.into(),
            tab,
        })
    }
    pub fn toggle_shared_map(id: impl Into<String>) -> Self {
        Self::Share(ShareMsg::ToggleActive(id.into()))
    }
    pub fn delete_shared_map(id: impl Into<String>) -> Self {
        Self::Share(ShareMsg::Delete(id.into()))
    }

    // Meetups
    pub fn meetups() -> Self {
        Self::Meetup(MeetupMsg::List)
    }
    pub fn create_meetup(meeting_date: NaiveDate, title: &str, participants: &str) -> Self {
        Self::Meetup(MeetupMsg::Create {
            meeting_date,
            title: title.to_string(),
            participants: participants.to_string(),
        })
    }
    pub fn suggest(meetup_id: &str, name: &str) -> Self {
        Self::Meetup(MeetupMsg::Suggest {
            meetup_id: meetup_id.to_string(),
            name: name.to_string(),
        })
    }
    pub fn vote(meetup_id: &str, place_id: &str, voter: &str) -> Self {
        Self::Meetup(MeetupMsg::Vote {
            meetup_id: meetup_id.to_string(),
            place_id: place_id.to_string(),
            voter: voter.to_string(),
        })
    }
    pub fn say(meetup_id: &str, author: &str, text: &str) -> Self {
        Self::Meetup(MeetupMsg::Say {
            meetup_id: meetup_id.to_string(),
            author: author.to_string(),
            text: text.to_string(),
        })
    }
}
