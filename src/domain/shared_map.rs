//! Maps the user has shared, and the management list over them

use chrono::NaiveDate;

#[derive(Clone, Debug, PartialEq)]
pub struct SharedMap {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: NaiveDate,
    pub view_count: u32,
    pub share_count: u32,
    pub participant_count: u32,
    /// Human readable region, as produced by the address resolver
    pub region: String,
    pub categories: Vec<String>,
    pub is_active: bool,
    pub share_url: String,
}

/// Tab filter on the management list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SharedMapTab {
    #[default]
    All,
    Active,
    Inactive,
}

impl SharedMapTab {
    fn matches(self, map: &SharedMap) -> bool {
        match self {
            SharedMapTab::All => true,
            SharedMapTab::Active => map.is_active,
            SharedMapTab::Inactive => !map.is_active,
        }
    }
}

/// Totals shown above the list
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SharedMapStats {
    pub total_maps: usize,
    pub total_views: u64,
    pub total_shares: u64,
    pub active_maps: usize,
}

#[derive(Clone, Debug, Default)]
pub struct SharedMapBoard {
    pub maps: Vec<SharedMap>,
}

impl SharedMapBoard {
    pub fn new(maps: Vec<SharedMap>) -> Self {
        Self { maps }
    }

    /// Maps whose title or description contains `search` (case-insensitive) and match `tab`
    pub fn filtered(&self, search: &str, tab: SharedMapTab) -> Vec<&SharedMap> {
        let needle = search.to_lowercase();
        self.maps
            .iter()
            .filter(|m| {
                m.title.to_lowercase().contains(&needle)
                    || m.description.to_lowercase().contains(&needle)
            })
            .filter(|m| tab.matches(m))
            .collect()
    }

    /// Flip the active flag; returns the new state, or None for an unknown id
    pub fn toggle_active(&mut self, id: &str) -> Option<bool> {
        let map = self.maps.iter_mut().find(|m| m.id == id)?;
        map.is_active = !map.is_active;
        Some(map.is_active)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.maps.len();
        self.maps.retain(|m| m.id != id);
        self.maps.len() != before
    }

    pub fn stats(&self) -> SharedMapStats {
        SharedMapStats {
            total_maps: self.maps.len(),
            total_views: self.maps.iter().map(|m| u64::from(m.view_count)).sum(),
            total_shares: self.maps.iter().map(|m| u64::from(m.share_count)).sum(),
            active_maps: self.maps.iter().filter(|m| m.is_active).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(id: &str, title: &str, description: &str, views: u32, active: bool) -> SharedMap {
        SharedMap {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            view_count: views,
            share_count: views / 4,
            participant_count: 3,
            region: String::new(),
            categories: vec![],
            is_active: active,
            share_url: format!("https://example.com/shared/{id}"),
        }
    }

    fn board() -> SharedMapBoard {
        SharedMapBoard::new(vec![
            map("1", "Food Tour", "restaurants with friends", 45, true),
            map("2", "Date course", "quiet CAFES", 23, true),
            map("3", "Hot places", "trendy food spots", 67, false),
        ])
    }

    #[test]
    fn test_search_and_tab_combine() {
        let b = board();
        let ids = |v: Vec<&SharedMap>| v.into_iter().map(|m| m.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(b.filtered("food", SharedMapTab::All)), vec!["1", "3"]);
        assert_eq!(ids(b.filtered("FOOD", SharedMapTab::Active)), vec!["1"]);
        assert_eq!(ids(b.filtered("cafes", SharedMapTab::All)), vec!["2"]);
        assert_eq!(ids(b.filtered("", SharedMapTab::Inactive)), vec!["3"]);
    }

    #[test]
    fn test_toggle_delete_and_stats() {
        let mut b = board();
        assert_eq!(
            b.stats(),
            SharedMapStats {
                total_maps: 3,
                total_views: 135,
                total_shares: 11 + 5 + 16,
                active_maps: 2,
            }
        );
        assert_eq!(b.toggle_active("3"), Some(true));
        assert_eq!(b.toggle_active("nope"), None);
        assert_eq!(b.stats().active_maps, 3);
        assert!(b.delete("1"));
        assert!(!b.delete("1"));
        assert_eq!(b.stats().total_maps, 2);
    }
}
