//! Meetup planning: appointments, venue votes and a message thread

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Timestamp format used for thread messages
pub const MESSAGE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeetupError {
    #[error("a title is required")]
    MissingTitle,
    #[error("a meeting date is required")]
    MissingDate,
    #[error("no appointment with id {0}")]
    UnknownAppointment(String),
    #[error("no suggested place with id {0}")]
    UnknownPlace(String),
    #[error("message text is empty")]
    EmptyMessage,
}

/// Lifecycle of an appointment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeetupStatus {
    #[default]
    Planning,
    Voting,
    Confirmed,
    Completed,
}

/// Candidate venue with the people who voted for it
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestedPlace {
    pub id: String,
    pub name: String,
    pub voters: Vec<String>,
}

impl SuggestedPlace {
    pub fn new(id: &str, name: &str, voters: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            voters: voters.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Vote count always equals the number of voters
    pub fn votes(&self) -> usize {
        self.voters.len()
    }

    pub fn has_voted(&self, voter: &str) -> bool {
        self.voters.iter().any(|v| v == voter)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub id: String,
    pub author: String,
    pub text: String,
    pub timestamp: NaiveDateTime,
}

impl Message {
    pub fn formatted_time(&self) -> String {
        self.timestamp.format(MESSAGE_TIME_FORMAT).to_string()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: NaiveDate,
    pub meeting_date: NaiveDate,
    pub status: MeetupStatus,
    pub participants: Vec<String>,
    pub suggested_places: Vec<SuggestedPlace>,
    pub messages: Vec<Message>,
}

impl Appointment {
    /// Add or withdraw `voter`'s vote; returns whether the vote is now cast
    pub fn toggle_vote(&mut self, place_id: &str, voter: &str) -> Result<bool, MeetupError> {
        let place = self
            .suggested_places
            .iter_mut()
            .find(|p| p.id == place_id)
            .ok_or_else(|| MeetupError::UnknownPlace(place_id.to_string()))?;

        if place.has_voted(voter) {
            place.voters.retain(|v| v != voter);
            Ok(false)
        } else {
            place.voters.push(voter.to_string());
            Ok(true)
        }
    }

    /// Propose a venue; the id is derived from the current list length
    pub fn suggest_place(&mut self, name: &str) -> &SuggestedPlace {
        let id = (self.suggested_places.len() + 1).to_string();
        self.suggested_places
            .push(SuggestedPlace::new(&id, name.trim(), &[]));
        // Just pushed
        &self.suggested_places[self.suggested_places.len() - 1]
    }

    pub fn post_message(
        &mut self,
        author: &str,
        text: &str,
        at: NaiveDateTime,
    ) -> Result<&Message, MeetupError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MeetupError::EmptyMessage);
        }
        let id = (self.messages.len() + 1).to_string();
        self.messages.push(Message {
            id,
            author: author.to_string(),
            text: text.to_string(),
            timestamp: at,
        });
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Venue with the most votes; earlier suggestions win ties
    pub fn leading_place(&self) -> Option<&SuggestedPlace> {
        self.suggested_places
            .iter()
            .filter(|p| p.votes() > 0)
            .fold(None, |best: Option<&SuggestedPlace>, p| match best {
                Some(b) if b.votes() >= p.votes() => Some(b),
                _ => Some(p),
            })
    }
}

/// Split a comma-separated participant list, dropping blanks
pub fn parse_participants(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Form input for a new appointment
#[derive(Clone, Debug, Default)]
pub struct AppointmentDraft {
    pub title: String,
    pub description: String,
    pub meeting_date: Option<NaiveDate>,
    pub participants: String,
}

impl AppointmentDraft {
    pub fn into_appointment(self, id: String, created_at: NaiveDate) -> Result<Appointment, MeetupError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(MeetupError::MissingTitle);
        }
        let meeting_date = self.meeting_date.ok_or(MeetupError::MissingDate)?;

        Ok(Appointment {
            id,
            title: title.to_string(),
            description: self.description,
            created_at,
            meeting_date,
            status: MeetupStatus::Planning,
            participants: parse_participants(&self.participants),
            suggested_places: Vec::new(),
            messages: Vec::new(),
        })
    }
}

/// All appointments, newest first
#[derive(Clone, Debug, Default)]
pub struct MeetupBoard {
    pub appointments: Vec<Appointment>,
    next_id: u64,
}

impl MeetupBoard {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        let next_id = appointments.len() as u64 + 1;
        Self {
            appointments,
            next_id,
        }
    }

    pub fn create(&mut self, draft: AppointmentDraft, today: NaiveDate) -> Result<&Appointment, MeetupError> {
        let appointment = draft.into_appointment(self.next_id.to_string(), today)?;
        self.next_id += 1;
        self.appointments.insert(0, appointment);
        Ok(&self.appointments[0])
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Appointment, MeetupError> {
        self.appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| MeetupError::UnknownAppointment(id.to_string()))
    }
}
