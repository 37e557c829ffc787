use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Receiver;

use crate::config::PlaceShareConfig;
use crate::core::control;
use crate::domain::{AppointmentDraft, MeetupStatus, PlaceDraft, SurfaceRect, SurfaceSize, find_category};
use crate::fl;
use crate::geocode::{
    AddressLookup, AreaSize, LookupResult, LookupStatus, MockAddressResolver, mock,
};
use crate::render::CoordinateMapper;
use crate::render::geometry::overlay;
use crate::session::Store;
use crate::session::messages::{FilterMsg, MapMsg, MeetupMsg, Msg, PlaceMsg, ShareMsg};
use crate::share;
use crate::widget::map_surface::{MapEvent, MapSurface, PointerContext, PointerEvent};

/// Run the interactive shell until `quit` or end of input
pub async fn run(config: PlaceShareConfig) -> Result<()> {
    let (mut app, mut lookups) = App::new(config)?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    app.say(fl!("welcome"));
    app.flush();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    log::debug!("stdin closed");
                    break;
                };
                let flow = app.command(&line);
                app.flush();
                if flow == Flow::Quit {
                    break;
                }
            }
            Some(result) = lookups.recv() => {
                app.apply_lookup(result);
                app.flush();
            }
        }
    }
    Ok(())
}

/// Whether the shell keeps reading commands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    pub config: PlaceShareConfig,
    pub store: Store,
    pub surface: MapSurface,
    pub lookup: AddressLookup,
    pub size: SurfaceSize,
    /// Lines waiting to be printed
    output: Vec<String>,
}

impl App {
    /// Build the app from validated configuration.
    ///
    /// Returns the receiver on which address lookups complete.
    pub fn new(config: PlaceShareConfig) -> Result<(Self, Receiver<LookupResult>)> {
        let mapper =
            CoordinateMapper::new(config.map_bounds).context("Invalid map bounds in config")?;
        let size = config
            .surface_size
            .validate()
            .context("Invalid surface size in config")?;
        let resolver = Arc::new(MockAddressResolver::hongdae(config.lookup_latency()));
        let (lookup, rx) = AddressLookup::new(resolver);

        let app = Self {
            surface: MapSurface::new(mapper, config.min_drag_px),
            store: Store::seeded(),
            lookup,
            size,
            config,
            output: Vec::new(),
        };
        Ok((app, rx))
    }

    pub fn say(&mut self, line: String) {
        self.output.push(line);
    }

    /// Take the queued output lines
    pub fn take_output(&mut self) -> Vec<String> {
        std::mem::take(&mut self.output)
    }

    fn flush(&mut self) {
        for line in self.take_output() {
            println!("{line}");
        }
    }

    /// Parse and apply one command line
    pub fn command(&mut self, line: &str) -> Flow {
        match control::parse(line) {
            Ok(Some(msg)) => self.update(msg),
            Ok(None) => Flow::Continue,
            Err(err) => {
                self.say(fl!("error", reason = err.to_string()));
                Flow::Continue
            }
        }
    }

    pub fn update(&mut self, msg: Msg) -> Flow {
        log::trace!("update: {msg:?}");
        let result = match msg {
            Msg::Map(msg) => self.update_map(msg),
            Msg::Place(msg) => self.update_place(msg),
            Msg::Filter(msg) => {
                self.update_filter(msg);
                Ok(())
            }
            Msg::Share(msg) => self.update_share(msg),
            Msg::Meetup(msg) => self.update_meetup(msg),
            Msg::Help => {
                for line in control::COMMANDS {
                    self.say(line.to_string());
                }
                Ok(())
            }
            Msg::Quit => return Flow::Quit,
        };
        if let Err(err) = result {
            self.say(fl!("error", reason = format!("{err:#}")));
        }
        Flow::Continue
    }

    /// Apply a finished address lookup unless a newer one superseded it
    pub fn apply_lookup(&mut self, result: LookupResult) {
        if !self.lookup.accept(result) {
            return;
        }
        let line = match self.lookup.status() {
            LookupStatus::Resolved(text) => fl!(
                "address-resolved",
                address = text.address.as_str(),
                area = area_key(text.area)
            ),
            LookupStatus::Failed => fl!("address-unavailable"),
            LookupStatus::Idle | LookupStatus::Loading => return,
        };
        self.say(line);
    }

    fn update_map(&mut self, msg: MapMsg) -> Result<()> {
        match msg {
            MapMsg::Pointer(event) => self.pointer(event),
            MapMsg::Resize(size) => {
                self.size = size.validate()?;
                self.say(fl!(
                    "resized",
                    width = size.width.to_string(),
                    height = size.height.to_string()
                ));
                Ok(())
            }
            MapMsg::Render => self.render(),
            MapMsg::ClearRegion => {
                self.store.clear_region();
                self.lookup.cancel();
                self.say(fl!("region-cleared"));
                Ok(())
            }
        }
    }

    fn pointer(&mut self, event: PointerEvent) -> Result<()> {
        // Hit-test against markers as they are drawn at the current size
        let visible = self.store.filtered_places();
        let markers = self
            .surface
            .view(&visible, &self.store.categories, None, self.size)?
            .markers;
        let ctx = PointerContext {
            size: self.size,
            mode: self.store.mode,
            markers: &markers,
        };
        let Some(event) = self.surface.handle(event, ctx)? else {
            return Ok(());
        };
        self.map_event(event);
        Ok(())
    }

    fn map_event(&mut self, event: MapEvent) {
        match event {
            MapEvent::RegionSelected(region) => {
                self.store.select_region(region);
                let (lat, lng) = share::summary(&region);
                self.say(fl!("region-selected", lat = lat, lng = lng));
                let count = self.store.places_in_region().len();
                self.say(fl!("places-header", count = count));
                self.lookup.request(region);
                self.say(fl!("address-loading"));
            }
            MapEvent::PlacementPositionChosen(position) => {
                self.store.choose_position(position);
                self.say(fl!(
                    "placement-chosen",
                    lat = format!("{:.6}", position.lat),
                    lng = format!("{:.6}", position.lng),
                    address = mock::detailed_address(position.lat, position.lng)
                ));
            }
            MapEvent::PlaceClicked(id) => {
                if self.store.select_place(&id).is_none() {
                    log::warn!("Clicked marker {id} has no place");
                    return;
                }
                let Some(place) = self.store.place(&id) else {
                    return;
                };
                let category = find_category(&self.store.categories, &place.category_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                let line = fl!(
                    "place-details",
                    name = place.name.as_str(),
                    category = category,
                    author = place.author.as_str(),
                    comment = place.comment.as_str()
                );
                self.say(line);
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let visible = self.store.filtered_places();
        let view = self.surface.view(
            &visible,
            &self.store.categories,
            self.store.selected_region.as_ref(),
            self.size,
        )?;

        let mut lines = Vec::with_capacity(view.markers.len() + 2);
        for marker in &view.markers {
            lines.push(fl!(
                "render-marker",
                icon = marker.icon.as_str(),
                name = marker.name.as_str(),
                x = format!("{:.1}", marker.position.x),
                y = format!("{:.1}", marker.position.y),
                color = marker.color.as_str(),
                selected = if marker.selected { "yes" } else { "no" }
            ));
        }
        if let Some(rect) = view.selection_box {
            lines.push(render_rect("selection", overlay::SELECTION_COLOR, &rect));
        }
        if let Some(rect) = view.region {
            lines.push(render_rect("region", overlay::REGION_COLOR, &rect));
        }
        self.output.extend(lines);
        Ok(())
    }

    fn update_place(&mut self, msg: PlaceMsg) -> Result<()> {
        match msg {
            PlaceMsg::StartAdding => {
                if self.store.is_adding() {
                    return Ok(());
                }
                self.store.start_adding();
                self.say(fl!("add-mode-on"));
            }
            PlaceMsg::CancelAdding => {
                self.store.cancel_adding();
                self.say(fl!("add-mode-off"));
            }
            PlaceMsg::Submit {
                category_id,
                name,
                author,
                comment,
            } => {
                let default_author = self
                    .config
                    .default_author
                    .clone()
                    .unwrap_or_else(|| fl!("default-author"));
                let draft = PlaceDraft {
                    name,
                    category_id,
                    author,
                    comment,
                    ..Default::default()
                };
                let place =
                    self.store
                        .add_place(draft, &default_author, &fl!("default-comment"))?;
                let line = fl!(
                    "place-added",
                    name = place.name.as_str(),
                    id = place.id.as_str()
                );
                self.say(line);
            }
            PlaceMsg::Close => {
                self.store.close_place();
                self.surface.clear_selection();
            }
            PlaceMsg::List => {
                let lines: Vec<String> = self
                    .store
                    .places_in_region()
                    .iter()
                    .map(|place| {
                        let icon = find_category(&self.store.categories, &place.category_id)
                            .map(|c| c.icon.as_str())
                            .unwrap_or_default();
                        fl!(
                            "place-line",
                            icon = icon,
                            name = place.name.as_str(),
                            author = place.author.as_str(),
                            favorite = if place.is_favorite { "yes" } else { "no" }
                        )
                    })
                    .collect();
                self.say(fl!("places-header", count = lines.len()));
                self.output.extend(lines);
            }
        }
        Ok(())
    }

    fn update_filter(&mut self, msg: FilterMsg) {
        let line = match msg {
            FilterMsg::Toggle(id) => {
                let Some(name) = find_category(&self.store.categories, &id).map(|c| c.name.clone())
                else {
                    self.say(fl!("error", reason = fl!("unknown-category", id = id)));
                    return;
                };
                if self.store.toggle_category(&id) {
                    fl!("category-shown", name = name)
                } else {
                    fl!("category-hidden", name = name)
                }
            }
            FilterMsg::SelectAll => {
                self.store.select_all_categories();
                fl!("categories-all")
            }
            FilterMsg::DeselectAll => {
                self.store.deselect_all_categories();
                fl!("categories-none")
            }
        };
        self.say(line);
        // A hidden place loses its highlight
        let visible = self.store.filtered_places();
        self.surface.retain_selection(&visible);
        if self
            .store
            .selected_place
            .as_deref()
            .is_some_and(|id| self.surface.selected_marker() != Some(id))
        {
            self.store.close_place();
        }
    }

    fn update_share(&mut self, msg: ShareMsg) -> Result<()> {
        match msg {
            ShareMsg::Create => {
                let url = self.store.share_link(&self.config.share_origin)?;
                self.say(fl!("share-link", url = url));
            }
            ShareMsg::Open(url) => {
                let view = share::parse(&url)?;
                let region = view.region;
                self.store.apply_shared_view(view);
                self.surface.clear_selection();
                self.store.close_place();
                let count = self.store.places_in_region().len();
                self.say(fl!("view-restored", count = count));
                self.lookup.request(region);
                self.say(fl!("address-loading"));
            }
            ShareMsg::ToggleActive(id) => match self.store.shared.toggle_active(&id) {
                Some(active) => {
                    let line = fl!(
                        "shared-toggled",
                        id = id,
                        active = if active { "yes" } else { "no" }
                    );
                    self.say(line);
                }
                None => self.say(fl!("error", reason = fl!("unknown-shared-map", id = id))),
            },
            ShareMsg::Delete(id) => {
                let line = if self.store.shared.delete(&id) {
                    fl!("shared-deleted", id = id)
                } else {
                    fl!("error", reason = fl!("unknown-shared-map", id = id))
                };
                self.say(line);
            }
            ShareMsg::List { search, tab } => {
                let stats = self.store.shared.stats();
                self.say(fl!(
                    "shared-stats",
                    maps = stats.total_maps,
                    views = stats.total_views,
                    shares = stats.total_shares,
                    active = stats.active_maps
                ));
                let lines: Vec<String> = self
                    .store
                    .shared
                    .filtered(&search, tab)
                    .into_iter()
                    .map(|map| {
                        fl!(
                            "shared-line",
                            id = map.id.as_str(),
                            title = map.title.as_str(),
                            region = map.region.as_str(),
                            views = map.view_count,
                            active = if map.is_active { "yes" } else { "no" }
                        )
                    })
                    .collect();
                self.output.extend(lines);
            }
        }
        Ok(())
    }

    fn update_meetup(&mut self, msg: MeetupMsg) -> Result<()> {
        match msg {
            MeetupMsg::List => {
                let mut lines = Vec::new();
                for apt in &self.store.meetups.appointments {
                    lines.push(fl!(
                        "meetup-line",
                        id = apt.id.as_str(),
                        title = apt.title.as_str(),
                        date = apt.meeting_date.to_string(),
                        status = status_key(apt.status),
                        count = apt.participants.len()
                    ));
                    for place in &apt.suggested_places {
                        lines.push(fl!(
                            "meetup-place",
                            id = place.id.as_str(),
                            name = place.name.as_str(),
                            votes = place.votes()
                        ));
                    }
                    if let Some(leader) = apt.leading_place() {
                        lines.push(fl!("meetup-leader", name = leader.name.as_str()));
                    }
                }
                self.output.extend(lines);
            }
            MeetupMsg::Create {
                meeting_date,
                title,
                participants,
            } => {
                let draft = AppointmentDraft {
                    title,
                    meeting_date: Some(meeting_date),
                    participants,
                    ..Default::default()
                };
                let today = chrono::Local::now().date_naive();
                let apt = self.store.meetups.create(draft, today)?;
                let line = fl!(
                    "meetup-created",
                    id = apt.id.as_str(),
                    title = apt.title.as_str()
                );
                self.say(line);
            }
            MeetupMsg::Suggest { meetup_id, name } => {
                let apt = self.store.meetups.get_mut(&meetup_id)?;
                let place = apt.suggest_place(&name);
                let line = fl!(
                    "place-suggested",
                    id = place.id.as_str(),
                    name = place.name.as_str()
                );
                self.say(line);
            }
            MeetupMsg::Vote {
                meetup_id,
                place_id,
                voter,
            } => {
                let apt = self.store.meetups.get_mut(&meetup_id)?;
                let added = apt.toggle_vote(&place_id, &voter)?;
                let votes = apt
                    .suggested_places
                    .iter()
                    .find(|p| p.id == place_id)
                    .map(|p| p.votes())
                    .unwrap_or_default();
                let line = if added {
                    fl!("vote-added", voter = voter, votes = votes)
                } else {
                    fl!("vote-removed", voter = voter, votes = votes)
                };
                self.say(line);
            }
            MeetupMsg::Say {
                meetup_id,
                author,
                text,
            } => {
                let now = chrono::Local::now().naive_local();
                let apt = self.store.meetups.get_mut(&meetup_id)?;
                let message = apt.post_message(&author, &text, now)?;
                let line = fl!(
                    "message-posted",
                    time = message.formatted_time(),
                    author = message.author.as_str(),
                    text = message.text.as_str()
                );
                self.say(line);
            }
        }
        Ok(())
    }
}

fn render_rect(kind: &'static str, color: &'static str, rect: &SurfaceRect) -> String {
    fl!(
        "render-rect",
        kind = kind,
        color = color,
        left = format!("{:.1}", rect.left),
        top = format!("{:.1}", rect.top),
        width = format!("{:.1}", rect.width()),
        height = format!("{:.1}", rect.height())
    )
}

fn area_key(area: AreaSize) -> &'static str {
    match area {
        AreaSize::Wide => "wide",
        AreaSize::Medium => "medium",
        AreaSize::Narrow => "narrow",
    }
}

fn status_key(status: MeetupStatus) -> &'static str {
    match status {
        MeetupStatus::Planning => "planning",
        MeetupStatus::Voting => "voting",
        MeetupStatus::Confirmed => "confirmed",
        MeetupStatus::Completed => "completed",
    }
}
