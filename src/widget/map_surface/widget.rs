use crate::domain::{
    Category, DragGesture, InteractionMode, MapperError, Place, SelectedRegion, SurfaceRect,
    SurfaceSize,
};
use crate::render::{CoordinateMapper, Marker, markers};

use super::events::{MapEvent, PointerEvent};

/// Selector state: either waiting for a press or tracking a drag
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SelectorState {
    #[default]
    Idle,
    Dragging(DragGesture),
}

/// Per-event inputs that the owner reads fresh for every pointer event
#[derive(Clone, Copy, Debug)]
pub struct PointerContext<'a> {
    pub size: SurfaceSize,
    pub mode: InteractionMode,
    /// Markers as currently drawn, for hit-testing
    pub markers: &'a [Marker],
}

/// Everything needed to draw one frame of the surface
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceView {
    pub markers: Vec<Marker>,
    pub selection_box: Option<SurfaceRect>,
    pub region: Option<SurfaceRect>,
}

/// Interactive map surface: drag-to-select, click-to-place and marker clicks
pub struct MapSurface {
    mapper: CoordinateMapper,
    state: SelectorState,
    /// Drags whose box is smaller than this on both axes are dropped (0 disables)
    min_drag_px: f64,
    selected_marker: Option<String>,
}

impl MapSurface {
    pub fn new(mapper: CoordinateMapper, min_drag_px: f64) -> Self {
        Self {
            mapper,
            state: SelectorState::Idle,
            min_drag_px: min_drag_px.max(0.0),
            selected_marker: None,
        }
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    pub fn selected_marker(&self) -> Option<&str> {
        self.selected_marker.as_deref()
    }

    /// Drop the marker highlight when its place is no longer shown
    pub fn retain_selection(&mut self, visible: &[&Place]) {
        let still_visible = match &self.selected_marker {
            Some(id) => visible.iter().any(|p| &p.id == id),
            None => true,
        };
        if !still_visible {
            self.selected_marker = None;
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_marker = None;
    }

    /// Feed one pointer event through the selector
    pub fn handle(
        &mut self,
        event: PointerEvent,
        ctx: PointerContext<'_>,
    ) -> Result<Option<MapEvent>, MapperError> {
        match (self.state, event) {
            (SelectorState::Idle, PointerEvent::Down(p)) => match ctx.mode {
                InteractionMode::AddPlace => {
                    let position = self.mapper.to_geo(p, ctx.size)?;
                    log::debug!("Placement position chosen at {position:?}");
                    Ok(Some(MapEvent::PlacementPositionChosen(position)))
                }
                InteractionMode::SelectRegion => {
                    if let Some(hit) = markers::hit_test(ctx.markers, p) {
                        let id = hit.place_id.clone();
                        self.selected_marker = Some(id.clone());
                        return Ok(Some(MapEvent::PlaceClicked(id)));
                    }
                    let start = self.mapper.to_geo(p, ctx.size)?;
                    self.state = SelectorState::Dragging(DragGesture::new(start));
                    Ok(None)
                }
            },
            (SelectorState::Dragging(mut gesture), PointerEvent::Move(p)) => {
                gesture.current = self.mapper.to_geo(p, ctx.size)?;
                self.state = SelectorState::Dragging(gesture);
                Ok(None)
            }
            (SelectorState::Dragging(mut gesture), PointerEvent::Up(p)) => {
                self.state = SelectorState::Idle;
                gesture.current = self.mapper.to_geo(p, ctx.size)?;

                let rect = markers::selection_box(&self.mapper, &gesture, ctx.size)?;
                if rect.width() < self.min_drag_px && rect.height() < self.min_drag_px {
                    log::debug!("Ignoring drag below {}px: {rect:?}", self.min_drag_px);
                    return Ok(None);
                }

                let region = gesture.region();
                log::debug!("Region selected: {region:?}");
                Ok(Some(MapEvent::RegionSelected(region)))
            }
            (SelectorState::Dragging(_), PointerEvent::Leave) => {
                log::debug!("Pointer left the surface, drag discarded");
                self.state = SelectorState::Idle;
                Ok(None)
            }
            // Move/Up/Leave while idle, or a second press mid-drag
            _ => Ok(None),
        }
    }

    /// Compute a frame for the given surface size
    pub fn view(
        &self,
        places: &[&Place],
        categories: &[Category],
        region: Option<&SelectedRegion>,
        size: SurfaceSize,
    ) -> Result<SurfaceView, MapperError> {
        let markers = markers::project_markers(
            &self.mapper,
            places,
            categories,
            size,
            self.selected_marker.as_deref(),
        )?;
        let selection_box = match &self.state {
            SelectorState::Dragging(gesture) => {
                Some(markers::selection_box(&self.mapper, gesture, size)?)
            }
            SelectorState::Idle => None,
        };
        let region = region
            .map(|r| markers::region_overlay(&self.mapper, r, size))
            .transpose()?;
        Ok(SurfaceView {
            markers,
            selection_box,
            region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoBounds, GeoPoint, SurfacePoint};

    fn size() -> SurfaceSize {
        SurfaceSize::new(800.0, 600.0)
    }

    fn surface() -> MapSurface {
        MapSurface::new(CoordinateMapper::new(GeoBounds::hongdae()).unwrap(), 0.0)
    }

    fn ctx(mode: InteractionMode) -> PointerContext<'static> {
        PointerContext {
            size: size(),
            mode,
            markers: &[],
        }
    }

    fn drag(s: &mut MapSurface, from: (f64, f64), to: (f64, f64)) -> Option<MapEvent> {
        let c = ctx(InteractionMode::SelectRegion);
        assert_eq!(s.handle(PointerEvent::down(from.0, from.1), c).unwrap(), None);
        assert_eq!(s.handle(PointerEvent::moved(to.0, to.1), c).unwrap(), None);
        s.handle(PointerEvent::up(to.0, to.1), c).unwrap()
    }

    fn expect_region(event: Option<MapEvent>) -> SelectedRegion {
        match event {
            Some(MapEvent::RegionSelected(r)) => r,
            other => panic!("expected a region, got {other:?}"),
        }
    }

    #[test]
    fn test_drag_scenario() {
        let mut s = surface();
        let region = expect_region(drag(&mut s, (100.0, 100.0), (300.0, 50.0)));

        let b = GeoBounds::hongdae();
        let lat_at = |y: f64| b.max_lat - (y / 600.0) * (b.max_lat - b.min_lat);
        let lng_at = |x: f64| b.min_lng + (x / 800.0) * (b.max_lng - b.min_lng);

        // Smaller y is further north
        assert!((region.north - lat_at(50.0)).abs() < 1e-9);
        assert!((region.south - lat_at(100.0)).abs() < 1e-9);
        assert!((region.west - lng_at(100.0)).abs() < 1e-9);
        assert!((region.east - lng_at(300.0)).abs() < 1e-9);
        assert_eq!(s.state(), SelectorState::Idle);
    }

    #[test]
    fn test_drag_direction_does_not_matter() {
        let mut s = surface();
        let forward = expect_region(drag(&mut s, (120.0, 400.0), (610.0, 35.0)));
        let backward = expect_region(drag(&mut s, (610.0, 35.0), (120.0, 400.0)));
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_zero_drag_is_a_point_region() {
        let mut s = surface();
        let r = expect_region(drag(&mut s, (250.0, 250.0), (250.0, 250.0)));
        assert_eq!(r.north, r.south);
        assert_eq!(r.east, r.west);
    }

    #[test]
    fn test_min_drag_threshold_drops_small_drags() {
        let mut s = MapSurface::new(CoordinateMapper::new(GeoBounds::hongdae()).unwrap(), 5.0);
        assert_eq!(drag(&mut s, (10.0, 10.0), (12.0, 13.0)), None);
        assert_eq!(s.state(), SelectorState::Idle);
        // Long but thin drags still count
        assert!(drag(&mut s, (10.0, 10.0), (200.0, 11.0)).is_some());
    }

    #[test]
    fn test_leave_discards_gesture() {
        let mut s = surface();
        let c = ctx(InteractionMode::SelectRegion);
        s.handle(PointerEvent::down(10.0, 10.0), c).unwrap();
        s.handle(PointerEvent::moved(90.0, 90.0), c).unwrap();
        assert_eq!(s.handle(PointerEvent::Leave, c).unwrap(), None);
        assert_eq!(s.state(), SelectorState::Idle);
        // Releasing afterwards emits nothing
        assert_eq!(s.handle(PointerEvent::up(90.0, 90.0), c).unwrap(), None);
    }

    #[test]
    fn test_drag_can_end_outside_surface() {
        let mut s = surface();
        let r = expect_region(drag(&mut s, (700.0, 500.0), (900.0, 700.0)));
        let b = GeoBounds::hongdae();
        assert!(r.east > b.max_lng);
        assert!(r.south < b.min_lat);
    }

    #[test]
    fn test_add_place_mode_emits_position() {
        let mut s = surface();
        let event = s
            .handle(PointerEvent::down(400.0, 300.0), ctx(InteractionMode::AddPlace))
            .unwrap();
        match event {
            Some(MapEvent::PlacementPositionChosen(GeoPoint { lat, lng })) => {
                assert!((lat - 37.5575).abs() < 1e-9);
                assert!((lng - 126.925).abs() < 1e-9);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(s.state(), SelectorState::Idle);
    }

    #[test]
    fn test_marker_click_does_not_start_drag() {
        let mut s = surface();
        let place = Place {
            id: "2".into(),
            name: "Cafe".into(),
            coordinates: GeoPoint::new(37.5573, 126.9246),
            category_id: "cafe".into(),
            author: String::new(),
            comment: String::new(),
            is_favorite: true,
            is_imported_favorite: false,
        };
        let categories = vec![Category::new("cafe", "Cafe", "#3b82f6", "☕")];
        let view = s.view(&[&place], &categories, None, size()).unwrap();
        let at = view.markers[0].position;

        let c = PointerContext {
            size: size(),
            mode: InteractionMode::SelectRegion,
            markers: &view.markers,
        };
        let event = s.handle(PointerEvent::Down(SurfacePoint::new(at.x + 3.0, at.y - 3.0)), c);
        assert_eq!(event.unwrap(), Some(MapEvent::PlaceClicked("2".into())));
        assert_eq!(s.state(), SelectorState::Idle);
        assert_eq!(s.selected_marker(), Some("2"));

        s.retain_selection(&[]);
        assert_eq!(s.selected_marker(), None);
    }

    #[test]
    fn test_view_tracks_drag_and_resize() {
        let mut s = surface();
        let c = ctx(InteractionMode::SelectRegion);
        s.handle(PointerEvent::down(100.0, 100.0), c).unwrap();
        s.handle(PointerEvent::moved(50.0, 200.0), c).unwrap();
        let view = s.view(&[], &[], None, size()).unwrap();
        let sel = view.selection_box.unwrap();
        let edges = [sel.left, sel.top, sel.right, sel.bottom];
        for (got, want) in edges.into_iter().zip([50.0, 100.0, 100.0, 200.0]) {
            assert!((got - want).abs() < 1e-6, "{edges:?}");
        }

        let region = SelectedRegion {
            north: 37.565,
            south: 37.55,
            east: 126.935,
            west: 126.915,
        };
        let half = s
            .view(&[], &[], Some(&region), SurfaceSize::new(400.0, 300.0))
            .unwrap()
            .region
            .unwrap();
        assert!((half.right - 400.0).abs() < 1e-9);
        assert!((half.bottom - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_resize_mid_drag_keeps_geographic_anchor() {
        let mut s = surface();
        s.handle(PointerEvent::down(100.0, 100.0), ctx(InteractionMode::SelectRegion))
            .unwrap();
        let anchor = s.mapper().to_geo(SurfacePoint::new(100.0, 100.0), size()).unwrap();

        let half = SurfaceSize::new(400.0, 300.0);
        let sel = s.view(&[], &[], None, half).unwrap().selection_box.unwrap();
        assert!((sel.left - 50.0).abs() < 1e-6);
        assert!((sel.top - 50.0).abs() < 1e-6);

        let c = PointerContext {
            size: half,
            mode: InteractionMode::SelectRegion,
            markers: &[],
        };
        let region = expect_region(s.handle(PointerEvent::up(200.0, 150.0), c).unwrap());
        assert!((region.north - anchor.lat).abs() < 1e-9);
        assert!((region.west - anchor.lng).abs() < 1e-9);
        assert!((region.north - 37.5625).abs() < 1e-9);
        assert!((region.west - 126.9175).abs() < 1e-9);
    }
}
