//! Session store: places, filters, the selected region and the side boards

use crate::domain::{
    Category, DraftError, GeoPoint, InteractionMode, MeetupBoard, Place, PlaceDraft,
    SelectedRegion, SharedMapBoard, filter_in_region, find_category,
};
use crate::share::{self, ShareError, SharedView};

use super::seed;

/// Everything the shell shows, owned by the app and passed by reference
#[derive(Clone, Debug, Default)]
pub struct Store {
    pub places: Vec<Place>,
    pub categories: Vec<Category>,
    /// Enabled category ids; places in other categories are hidden
    pub selected_categories: Vec<String>,
    pub selected_region: Option<SelectedRegion>,
    pub selected_place: Option<String>,
    pub mode: InteractionMode,
    /// Position picked in add mode, waiting for the draft to be submitted
    pub pending_position: Option<GeoPoint>,
    pub meetups: MeetupBoard,
    pub shared: SharedMapBoard,
    next_place_id: u64,
}

impl Store {
    /// All categories start enabled
    pub fn new(places: Vec<Place>, categories: Vec<Category>) -> Self {
        let selected_categories = categories.iter().map(|c| c.id.clone()).collect();
        Self {
            places,
            categories,
            selected_categories,
            next_place_id: 1,
            ..Default::default()
        }
    }

    /// Store preloaded with the demo places, meetups and shared maps
    pub fn seeded() -> Self {
        Self {
            meetups: MeetupBoard::new(seed::appointments()),
            shared: SharedMapBoard::new(seed::shared_maps()),
            ..Self::new(seed::places(), seed::categories())
        }
    }

    pub fn is_category_enabled(&self, id: &str) -> bool {
        self.selected_categories.iter().any(|c| c == id)
    }

    /// Flip one category; returns whether it is enabled afterwards
    pub fn toggle_category(&mut self, id: &str) -> bool {
        if find_category(&self.categories, id).is_none() {
            log::debug!("Ignoring toggle of unknown category {id}");
            return false;
        }
        if self.is_category_enabled(id) {
            self.selected_categories.retain(|c| c != id);
            false
        } else {
            self.selected_categories.push(id.to_string());
            true
        }
    }

    pub fn select_all_categories(&mut self) {
        self.selected_categories = self.categories.iter().map(|c| c.id.clone()).collect();
    }

    pub fn deselect_all_categories(&mut self) {
        self.selected_categories.clear();
    }

    /// Enabled category ids in category order
    pub fn enabled_category_ids(&self) -> Vec<String> {
        self.categories
            .iter()
            .filter(|c| self.is_category_enabled(&c.id))
            .map(|c| c.id.clone())
            .collect()
    }

    /// Places in an enabled category, in insertion order
    pub fn filtered_places(&self) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|p| self.is_category_enabled(&p.category_id))
            .collect()
    }

    /// Filtered places inside the selected region, or all filtered places
    pub fn places_in_region(&self) -> Vec<&Place> {
        match &self.selected_region {
            Some(region) => filter_in_region(self.filtered_places(), region),
            None => self.filtered_places(),
        }
    }

    pub fn select_region(&mut self, region: SelectedRegion) {
        log::debug!("Region selected: {region:?}");
        self.selected_region = Some(region);
    }

    pub fn clear_region(&mut self) {
        self.selected_region = None;
    }

    pub fn place(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn select_place(&mut self, id: &str) -> Option<&Place> {
        let place = self.places.iter().find(|p| p.id == id)?;
        self.selected_place = Some(place.id.clone());
        Some(place)
    }

    pub fn close_place(&mut self) {
        self.selected_place = None;
    }

    pub fn start_adding(&mut self) {
        self.mode = InteractionMode::AddPlace;
        self.pending_position = None;
    }

    pub fn cancel_adding(&mut self) {
        self.mode = InteractionMode::SelectRegion;
        self.pending_position = None;
    }

    pub fn is_adding(&self) -> bool {
        self.mode == InteractionMode::AddPlace
    }

    pub fn choose_position(&mut self, position: GeoPoint) {
        self.pending_position = Some(position);
    }

    /// Validate and store a new place, ending add mode.
    ///
    /// A draft without a position uses the one picked on the map.
    pub fn add_place(
        &mut self,
        mut draft: PlaceDraft,
        default_author: &str,
        default_comment: &str,
    ) -> Result<&Place, DraftError> {
        if draft.position.is_none() {
            draft.position = self.pending_position;
        }
        let id = format!("place-{}", self.next_place_id);
        let place = draft.into_place(id, &self.categories, default_author, default_comment)?;
        self.next_place_id += 1;
        log::info!("Added place {} ({})", place.id, place.name);

        self.places.push(place);
        self.cancel_adding();
        Ok(&self.places[self.places.len() - 1])
    }

    /// Share link for the selected region and enabled categories
    pub fn share_link(&self, origin: &str) -> Result<String, ShareError> {
        let region = self.selected_region.as_ref().ok_or(ShareError::NoRegion)?;
        Ok(share::build(origin, region, &self.enabled_category_ids()))
    }

    /// Restore a region and filter from a share link; unknown categories are dropped
    pub fn apply_shared_view(&mut self, view: SharedView) {
        self.selected_categories = view
            .categories
            .into_iter()
            .filter(|id| find_category(&self.categories, id).is_some())
            .collect();
        self.select_region(view.region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hongdae_region() -> SelectedRegion {
        SelectedRegion {
            north: 37.5575,
            south: 37.555,
            east: 126.925,
            west: 126.92,
        }
    }

    fn ids(places: &[&Place]) -> Vec<String> {
        places.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_seeded_store_shows_everything() {
        let store = Store::seeded();
        assert_eq!(store.filtered_places().len(), 4);
        assert_eq!(store.places_in_region().len(), 4);
        assert_eq!(store.enabled_category_ids().len(), 4);
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let mut store = Store::seeded();
        assert!(!store.toggle_category("cafe"));
        assert_eq!(ids(&store.filtered_places()), vec!["1", "3", "4"]);

        assert!(store.toggle_category("cafe"));
        // Re-enabled categories keep place order, not toggle order
        assert_eq!(ids(&store.filtered_places()), vec!["1", "2", "3", "4"]);

        assert!(!store.toggle_category("nope"));
        store.deselect_all_categories();
        assert!(store.filtered_places().is_empty());
        store.select_all_categories();
        assert_eq!(store.filtered_places().len(), 4);
    }

    #[test]
    fn test_places_in_region_combines_filter_and_region() {
        let mut store = Store::seeded();
        store.select_region(hongdae_region());
        // 4 is at 37.5583 (outside to the north)
        assert_eq!(ids(&store.places_in_region()), vec!["1", "2", "3"]);

        store.toggle_category("restaurant");
        assert_eq!(ids(&store.places_in_region()), vec!["2", "3"]);

        store.clear_region();
        assert_eq!(ids(&store.places_in_region()), vec!["2", "3", "4"]);
    }

    #[test]
    fn test_add_place_flow() {
        let mut store = Store::seeded();
        store.start_adding();
        assert!(store.is_adding());
        store.choose_position(GeoPoint::new(37.556, 126.921));

        let draft = PlaceDraft {
            name: "새 카페".into(),
            category_id: "cafe".into(),
            ..Default::default()
        };
        let place = store.add_place(draft, "익명", "추천 장소입니다.").unwrap();
        assert_eq!(place.id, "place-1");
        assert_eq!(place.author, "익명");
        assert_eq!(place.coordinates, GeoPoint::new(37.556, 126.921));

        assert!(!store.is_adding());
        assert_eq!(store.pending_position, None);
        assert_eq!(store.places.len(), 5);

        // Ids keep counting up
        store.start_adding();
        store.choose_position(GeoPoint::new(37.557, 126.921));
        let draft = PlaceDraft {
            name: "두번째".into(),
            category_id: "culture".into(),
            ..Default::default()
        };
        assert_eq!(store.add_place(draft, "a", "c").unwrap().id, "place-2");
    }

    #[test]
    fn test_invalid_draft_keeps_add_mode() {
        let mut store = Store::seeded();
        store.start_adding();
        let draft = PlaceDraft {
            name: "nowhere".into(),
            category_id: "cafe".into(),
            ..Default::default()
        };
        assert_eq!(
            store.add_place(draft, "a", "c").unwrap_err(),
            DraftError::MissingPosition
        );
        assert!(store.is_adding());
        assert_eq!(store.places.len(), 4);
    }

    #[test]
    fn test_cancel_adding_clears_position() {
        let mut store = Store::seeded();
        store.start_adding();
        store.choose_position(GeoPoint::new(37.556, 126.921));
        store.cancel_adding();
        assert_eq!(store.mode, InteractionMode::SelectRegion);
        assert_eq!(store.pending_position, None);
    }

    #[test]
    fn test_share_requires_region() {
        let mut store = Store::seeded();
        assert_eq!(store.share_link("http://x"), Err(ShareError::NoRegion));

        store.select_region(hongdae_region());
        store.toggle_category("entertainment");
        let link = store.share_link("http://x").unwrap();
        assert!(link.ends_with("categories=restaurant%2Ccafe%2Cculture"));
    }

    #[test]
    fn test_apply_shared_view_drops_unknown_categories() {
        let mut store = Store::seeded();
        store.apply_shared_view(SharedView {
            region: hongdae_region(),
            categories: vec!["cafe".into(), "bakery".into()],
        });
        assert_eq!(store.selected_categories, vec!["cafe"]);
        assert_eq!(store.selected_region, Some(hongdae_region()));
        assert_eq!(ids(&store.places_in_region()), vec!["2"]);
    }

    #[test]
    fn test_select_place() {
        let mut store = Store::seeded();
        assert!(store.select_place("missing").is_none());
        assert_eq!(store.select_place("3").map(|p| p.name.as_str()), Some("홍대 클럽 - 클럽 에반스"));
        assert_eq!(store.selected_place.as_deref(), Some("3"));
        store.close_place();
        assert_eq!(store.selected_place, None);
    }
}
