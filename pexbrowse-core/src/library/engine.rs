//! The asset library actor.
//!
//! One task owns the query state, the result set and the selection. Handles
//! talk to it over an unbounded channel; network calls run in spawned tasks
//! whose results come back as messages, so state is only ever touched from
//! the engine task.

use std::sync::Arc;

use pexbrowse_config::LibrarySettings;
use pexbrowse_model::{Asset, AssetId, MediaType};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

use crate::error::LibraryError;
use crate::gateway::{Fetched, Gateway};
use crate::mapper::AssetMapper;
use crate::providers::{AssetPage, MAX_PER_PAGE};

use super::filters::{self, FilterControls};
use super::handle::LibraryHandle;
use super::messages::Message;
use super::options::{AllowedAssetTypes, Availability, LibraryMode, LibraryOptions};
use super::plan::FetchPlan;
use super::query::{self, QueryState};
use super::scheduler::{FetchScheduler, FetchTicket};
use super::selection::{Resolution, SelectionTracker};
use super::snapshot::LibrarySnapshot;

type SelectionReply = Option<oneshot::Sender<Option<AssetId>>>;

/// State owner for one asset library.
///
/// Runs as a task fed by [`LibraryHandle`] messages. Every message goes
/// through `update`, after which a fresh [`LibrarySnapshot`] is published.
/// Fetches and lookups run on their own tasks and report back as messages.
pub struct LibraryEngine {
    gateway: Gateway,
    mapper: Arc<dyn AssetMapper>,
    per_page: u32,
    include_credits: bool,
    mode: LibraryMode,
    allowed: AllowedAssetTypes,
    availability: Availability,

    query: QueryState,
    scheduler: FetchScheduler,
    items: Arc<Vec<Asset>>,
    total_results: u64,
    loading: bool,
    error: Option<LibraryError>,
    /// Plan whose response is currently displayed
    last_served: Option<FetchPlan>,
    /// Next settle fetches even if the plan is unchanged
    force_next: bool,

    selection: SelectionTracker,
    resolving: usize,

    fetches_completed: u64,
    commands_applied: u64,

    sender: mpsc::WeakUnboundedSender<Message>,
    state: watch::Sender<LibrarySnapshot>,
}

impl std::fmt::Debug for LibraryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryEngine")
            .field("mode", &self.mode)
            .field("query", &self.query)
            .field("phase", &self.scheduler.phase())
            .field("items", &self.items.len())
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

impl LibraryEngine {
    /// Start the engine on the current tokio runtime and return a handle to
    /// it. The engine stops once every handle has been dropped.
    ///
    /// The initial fetch is scheduled immediately, and an initial external
    /// selection in `options` is resolved.
    pub fn spawn(
        gateway: Gateway,
        mapper: Arc<dyn AssetMapper>,
        settings: &LibrarySettings,
        options: LibraryOptions,
    ) -> LibraryHandle {
        let (sender, inbox) = mpsc::unbounded_channel();
        let availability = options.availability();
        let media_type = options.allowed_asset_types.initial_media_type();

        let mut engine = LibraryEngine {
            gateway,
            mapper,
            per_page: settings.assets_per_page.clamp(1, MAX_PER_PAGE),
            include_credits: settings.add_author_credits,
            mode: options.mode,
            allowed: options.allowed_asset_types,
            availability,
            query: QueryState::new(media_type, &options.initial_search),
            scheduler: FetchScheduler::new(settings.debounce),
            items: Arc::new(Vec::new()),
            total_results: 0,
            loading: false,
            error: None,
            last_served: None,
            force_next: false,
            selection: SelectionTracker::default(),
            resolving: 0,
            fetches_completed: 0,
            commands_applied: 0,
            sender: sender.downgrade(),
            state: watch::Sender::new(LibrarySnapshot::default()),
        };

        info!(
            mode = %engine.mode,
            media_type = %media_type,
            per_page = engine.per_page,
            ?availability,
            "starting asset library"
        );

        if availability == Availability::UnsupportedAssetTypes {
            warn!("{}", LibraryError::UnsupportedAssetType);
        } else {
            if options.skip_initial_fetch {
                debug!("initial fetch skipped");
            } else {
                engine.schedule_fetch();
            }
            if let Some(id) = options
                .selected_asset_id
                .filter(|id| !id.trim().is_empty())
            {
                let media_type =
                    options.selected_media_type.unwrap_or(media_type);
                engine.resolve_external(id, media_type, None);
            }
        }

        engine.publish();
        let state = engine.state.subscribe();
        let handle = LibraryHandle::new(sender, state, engine.mode);
        tokio::spawn(engine.run(inbox));
        handle
    }

    async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Message>) {
        loop {
            let deadline = self.scheduler.deadline();
            tokio::select! {
                message = inbox.recv() => match message {
                    Some(message) => self.update(message),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.on_debounce_elapsed();
                }
            }
            self.publish();
        }
        debug!("asset library engine stopped");
    }

    fn update(&mut self, message: Message) {
        let is_command = message.is_command();
        debug!(message = message.name(), "library update");

        match message {
            Message::UpdateQuery(query) => {
                if self.query.set_search_query(&query) {
                    self.schedule_fetch();
                }
            }

            Message::SetMediaType(media_type) => {
                if !self.allowed.allows(media_type) {
                    debug!(%media_type, "media type not allowed, ignoring");
                } else if self.query.set_media_type(media_type) {
                    self.schedule_fetch();
                }
            }

            Message::SetFilter(setting) => {
                let dimension = setting.dimension();
                let enabled = filters::is_enabled(
                    dimension,
                    self.query.has_query(),
                    self.query.media_type(),
                );
                if !enabled {
                    debug!(%dimension, "filter disabled, ignoring change");
                } else if self.query.set_filter(setting) {
                    self.schedule_fetch();
                }
            }

            Message::SetPage(page) => {
                if self.query.set_page(page) {
                    self.schedule_fetch();
                }
            }

            Message::NextPage => {
                let page = self.query.page();
                let last = query::total_pages(self.total_results, self.per_page);
                if u64::from(page) >= last {
                    debug!(page, last, "already on the last page");
                } else if self.query.set_page(page + 1) {
                    self.schedule_fetch();
                }
            }

            Message::PreviousPage => {
                let page = self.query.page();
                if page > 1 && self.query.set_page(page - 1) {
                    self.schedule_fetch();
                }
            }

            Message::ClearAllFilters => {
                if self.query.clear_filters() {
                    self.schedule_fetch();
                }
            }

            Message::Retry => {
                self.force_next = true;
                self.schedule_fetch();
            }

            Message::Select {
                asset,
                rendition,
                reply,
            } => {
                let record = self.selection.select(
                    &asset,
                    rendition,
                    self.mapper.as_ref(),
                    self.include_credits,
                );
                info!(asset_id = %asset.id(), media_type = %asset.media_type(), "asset selected");
                let _ = reply.send(record);
            }

            Message::SelectById {
                id,
                rendition,
                reply,
            } => {
                let items = Arc::clone(&self.items);
                let result = match items.iter().find(|asset| asset.id() == id) {
                    Some(asset) => {
                        info!(asset_id = %id, "asset selected");
                        Ok(self.selection.select(
                            asset,
                            rendition,
                            self.mapper.as_ref(),
                            self.include_credits,
                        ))
                    }
                    None => {
                        warn!(asset_id = %id, "asset not in current results");
                        Err(LibraryError::asset_not_found(id))
                    }
                };
                let _ = reply.send(result);
            }

            Message::ResolveSelection {
                id,
                media_type,
                reply,
            } => self.resolve_external(id, media_type, reply),

            Message::FetchCompleted {
                ticket,
                plan,
                fetched,
            } => self.on_fetch_completed(ticket, plan, fetched),

            Message::ResolutionCompleted { id, fetched, reply } => {
                self.on_resolution_completed(id, fetched, reply)
            }
        }

        if is_command {
            self.commands_applied += 1;
        }
    }

    fn schedule_fetch(&mut self) {
        if self.availability == Availability::UnsupportedAssetTypes {
            debug!("asset types unsupported, not fetching");
            return;
        }
        self.scheduler.trigger(Instant::now());
    }

    fn on_debounce_elapsed(&mut self) {
        // Plan from the state as it is now, not as it was when triggered.
        let plan = FetchPlan::for_state(&self.query, self.per_page);
        let forced = std::mem::take(&mut self.force_next);

        if !forced
            && self.error.is_none()
            && self.last_served.as_ref() == Some(&plan)
        {
            debug!(endpoint = plan.endpoint(), "request unchanged, skipping fetch");
            self.scheduler.skip();
            self.loading = false;
            return;
        }

        let Some(ticket) = self.scheduler.start_fetch() else {
            return;
        };
        self.loading = true;
        self.error = None;

        info!(
            endpoint = plan.endpoint(),
            page = plan.paging().page,
            ticket = ticket.get(),
            "fetching assets"
        );

        let gateway = self.gateway.clone();
        let sender = self.sender.clone();
        tokio::spawn(async move {
            let fetched = gateway.execute(&plan).await;
            if let Some(sender) = sender.upgrade() {
                let _ = sender.send(Message::FetchCompleted {
                    ticket,
                    plan,
                    fetched,
                });
            }
        });
    }

    fn on_fetch_completed(
        &mut self,
        ticket: FetchTicket,
        plan: FetchPlan,
        fetched: Fetched<AssetPage>,
    ) {
        let Some(finished) = self.scheduler.finish(ticket) else {
            debug!(ticket = ticket.get(), "completion for unknown fetch ignored");
            return;
        };

        let latest = FetchPlan::for_state(&self.query, self.per_page);
        if plan != latest {
            debug!(
                ticket = ticket.get(),
                endpoint = plan.endpoint(),
                "discarding response to superseded request"
            );
            if !finished.refetch_pending {
                self.scheduler.trigger(Instant::now());
            }
            return;
        }

        self.total_results = fetched.value.total_results;
        self.items = Arc::new(fetched.value.items);
        match fetched.failure {
            Some(failure) => {
                let error = LibraryError::from(failure);
                warn!(endpoint = plan.endpoint(), error = %error, "fetch failed");
                self.error = Some(error);
                self.last_served = None;
            }
            None => {
                debug!(
                    ticket = ticket.get(),
                    items = self.items.len(),
                    total = self.total_results,
                    "results applied"
                );
                self.error = None;
                self.last_served = Some(plan);
            }
        }
        self.loading = false;
        self.fetches_completed += 1;
    }

    fn resolve_external(
        &mut self,
        raw_id: String,
        media_type: MediaType,
        reply: SelectionReply,
    ) {
        let Ok(id) = raw_id.parse::<AssetId>() else {
            warn!(asset_id = %raw_id, "external selection is not a valid asset id");
            self.selection.clear();
            respond(reply, None);
            return;
        };

        match self.selection.begin_resolution(id, media_type, &self.items) {
            Resolution::Present(id) => {
                debug!(asset_id = %id, "external selection found in results");
                respond(reply, Some(id));
            }
            Resolution::Lookup(id) => {
                info!(asset_id = %id, %media_type, "looking up external selection");
                self.resolving += 1;

                let gateway = self.gateway.clone();
                let sender = self.sender.clone();
                tokio::spawn(async move {
                    let fetched = gateway.asset_by_id(id, media_type).await;
                    if let Some(sender) = sender.upgrade() {
                        let _ = sender.send(Message::ResolutionCompleted {
                            id,
                            fetched,
                            reply,
                        });
                    }
                });
            }
        }
    }

    fn on_resolution_completed(
        &mut self,
        id: AssetId,
        fetched: Fetched<Option<Asset>>,
        reply: SelectionReply,
    ) {
        self.resolving = self.resolving.saturating_sub(1);

        let found = fetched.value.is_some();
        if let Some(failure) = &fetched.failure {
            warn!(asset_id = %id, error = %failure, "external selection lookup failed");
        } else if !found {
            warn!(asset_id = %id, "{}", LibraryError::asset_not_found(id));
        }

        let selected = self.selection.finish_resolution(id, found);
        respond(reply, selected);
    }

    fn publish(&self) {
        self.state.send_replace(self.snapshot());
    }

    fn snapshot(&self) -> LibrarySnapshot {
        LibrarySnapshot {
            mode: self.mode,
            availability: self.availability,
            media_type: self.query.media_type(),
            search_query: self.query.search_query().to_string(),
            page: self.query.page(),
            filters: FilterControls::derive(&self.query),
            items: Arc::clone(&self.items),
            total_results: self.total_results,
            items_per_page: self.per_page,
            loading: self.loading,
            error: self.error.clone(),
            phase: self.scheduler.phase(),
            selected_id: self.selection.selected(),
            resolving: self.resolving,
            fetches_completed: self.fetches_completed,
            commands_applied: self.commands_applied,
        }
    }
}

fn respond(reply: SelectionReply, selected: Option<AssetId>) {
    if let Some(reply) = reply {
        let _ = reply.send(selected);
    }
}
