//! Ordered content list controller
//!
//! Holds a server-backed list of orderable records (banners, banquet
//! gallery images, testimonials) and runs the admin actions on it: create,
//! update, delete, toggle active, move up / move down.
//!
//! After every mutation the whole list is fetched again; the local copy is
//! never patched optimistically. A move writes both swapped `order` values
//! concurrently and refetches only once both writes have settled, whether
//! or not they succeeded.
//!
//! Failures are reported to the [`Notifier`] and returned; nothing is
//! retried.

mod claim;
mod phase;

pub use claim::{Claim, InFlight};
pub use phase::ActionPhase;

use std::future::Future;
use std::sync::Arc;

use shared::ordering::{neighbor_index, sort_records};
use shared::{Direction, ListSort, Orderable, SharedError, validation};
use tokio::sync::{RwLock, watch};

use crate::client::HttpClient;
use crate::error::{ClientError, ClientResult};
use crate::notify::{Confirm, Notifier, Toast, TracingNotifier};
use crate::resource::ResourceApi;
use phase::{PhaseBoard, PhaseRun};

/// In-flight slot taken by `create`, so a double submit is refused
const CREATE_SLOT: &str = "__create__";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// First item moved up or last item moved down; nothing was sent
    AtBoundary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user said no; nothing was sent
    Declined,
}

/// What happens to the list after an action's request settles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refetch {
    OnSuccess,
    Always,
}

pub struct OrderedList<C, T> {
    api: ResourceApi<C, T>,
    sort: ListSort,
    items: RwLock<Vec<T>>,
    in_flight: InFlight,
    phase: PhaseBoard,
    notifier: Arc<dyn Notifier>,
}

impl<C: HttpClient, T: Orderable> OrderedList<C, T> {
    pub fn new(client: C) -> Self {
        Self {
            api: ResourceApi::new(client),
            sort: ListSort::ByOrder,
            items: RwLock::new(Vec::new()),
            in_flight: InFlight::new(),
            phase: PhaseBoard::new(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    pub fn with_sort(mut self, sort: ListSort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn api(&self) -> &ResourceApi<C, T> {
        &self.api
    }

    pub fn sort(&self) -> ListSort {
        self.sort
    }

    /// Snapshot of the list as last fetched, sorted
    pub async fn items(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn find(&self, id: &str) -> Option<T> {
        self.items.read().await.iter().find(|r| r.id() == id).cloned()
    }

    /// Whether an action on `id` is still running; UIs disable its controls
    pub fn is_pending(&self, id: &str) -> bool {
        self.in_flight.is_pending(id)
    }

    pub fn is_creating(&self) -> bool {
        self.in_flight.is_pending(CREATE_SLOT)
    }

    /// Phase of the list's actions; `Idle` only when none is running
    pub fn phase(&self) -> ActionPhase {
        self.phase.current()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<ActionPhase> {
        self.phase.subscribe()
    }

    /// Whether `id` has a neighbour in `direction`
    pub async fn can_move(&self, id: &str, direction: Direction) -> bool {
        let items = self.items.read().await;
        items
            .iter()
            .position(|r| r.id() == id)
            .and_then(|index| self.neighbor_of(&items, index, direction))
            .is_some()
    }

    // ========== List ==========

    /// Fetch the whole collection and replace the local list.
    ///
    /// On failure the previous list is kept.
    pub async fn refresh(&self) -> ClientResult<Vec<T>> {
        match self.api.list().await {
            Ok(mut records) => {
                sort_records(&mut records, self.sort);
                tracing::debug!(resource = T::LABEL, count = records.len(), "List refreshed");
                *self.items.write().await = records.clone();
                Ok(records)
            }
            Err(e) => {
                tracing::warn!(resource = T::LABEL, error = %e, "Failed to load list");
                self.notifier.notify(Toast::error(e.user_message()));
                Err(e)
            }
        }
    }

    // ========== Mutations ==========

    /// Validate and POST a new record, then refetch.
    ///
    /// The payload is only borrowed, so a rejected form keeps its values.
    pub async fn create(&self, payload: &T::Create) -> ClientResult<T> {
        let claim = self.claim(&[CREATE_SLOT])?;
        self.run(
            "create",
            claim,
            validation::check(payload),
            self.api.create(payload),
            Refetch::OnSuccess,
        )
        .await
    }

    /// PUT the `Some` fields of `patch`, then refetch.
    pub async fn update(&self, id: &str, patch: &T::Update) -> ClientResult<T> {
        let claim = self.claim(&[id])?;
        self.run(
            "update",
            claim,
            validation::check(patch),
            self.api.update(id, patch),
            Refetch::OnSuccess,
        )
        .await
    }

    /// Ask for confirmation, then DELETE and refetch.
    ///
    /// A declined prompt sends nothing. A failed delete leaves the record
    /// in the list.
    pub async fn delete(&self, id: &str, confirm: &dyn Confirm) -> ClientResult<DeleteOutcome> {
        let claim = self.claim(&[id])?;
        let prompt = format!("Delete this {}? This cannot be undone.", T::LABEL);
        if !confirm.confirm(&prompt).await {
            tracing::debug!(resource = T::LABEL, id, "Delete declined");
            return Ok(DeleteOutcome::Declined);
        }
        self.run(
            "delete",
            claim,
            Ok(()),
            self.api.delete(id),
            Refetch::OnSuccess,
        )
        .await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Flip `isActive` on one record; no other field is sent.
    pub async fn toggle_active(&self, id: &str) -> ClientResult<T> {
        let record = self.require(id).await?;
        let patch = T::active_patch(!record.is_active());
        self.update(id, &patch).await
    }

    /// Swap `order` with the neighbour in `direction`.
    ///
    /// At the boundary nothing is sent; with `ActiveFirst` that includes
    /// the edge between active and inactive records. Otherwise both PUTs go out
    /// together, and the list is refetched after both settle even if one
    /// failed, so the displayed order is always the server's.
    pub async fn move_item(&self, id: &str, direction: Direction) -> ClientResult<MoveOutcome> {
        let Some((current, neighbor)) = self.swap_pair(id, direction).await? else {
            tracing::debug!(resource = T::LABEL, id, %direction, "Move at boundary ignored");
            return Ok(MoveOutcome::AtBoundary);
        };

        let claim = self.claim(&[current.id(), neighbor.id()])?;
        let current_patch = T::order_patch(neighbor.order());
        let neighbor_patch = T::order_patch(current.order());

        let swap = async {
            let (a, b) = futures::join!(
                self.api.update(current.id(), &current_patch),
                self.api.update(neighbor.id(), &neighbor_patch),
            );
            a.and(b).map(|_| ())
        };

        self.run("move", claim, Ok(()), swap, Refetch::Always).await?;
        tracing::info!(
            resource = T::LABEL,
            id,
            with = neighbor.id(),
            %direction,
            "Moved"
        );
        Ok(MoveOutcome::Moved)
    }

    // ========== Internals ==========

    fn claim(&self, keys: &[&str]) -> ClientResult<Claim> {
        self.in_flight.claim(keys).inspect_err(|e| {
            tracing::debug!(resource = T::LABEL, error = %e, "Action refused");
            self.notifier.notify(Toast::error(e.user_message()));
        })
    }

    /// The record and the neighbour it swaps with, or `None` at the boundary
    async fn swap_pair(&self, id: &str, direction: Direction) -> ClientResult<Option<(T, T)>> {
        let items = self.items.read().await;
        let Some(index) = items.iter().position(|r| r.id() == id) else {
            drop(items);
            let err = self.not_found(id);
            self.notifier.notify(Toast::error(err.user_message()));
            return Err(err);
        };
        Ok(self
            .neighbor_of(&items, index, direction)
            .and_then(|other| Some((items.get(index)?.clone(), items.get(other)?.clone()))))
    }

    /// Neighbour a record swaps with in the current view.
    ///
    /// With `ActiveFirst` the view is split into an active and an inactive
    /// block. Swapping `order` across the split would not change positions,
    /// so the edge of each block counts as a boundary.
    fn neighbor_of(&self, items: &[T], index: usize, direction: Direction) -> Option<usize> {
        let other = neighbor_index(items.len(), index, direction)?;
        if self.sort == ListSort::ActiveFirst
            && items.get(index)?.is_active() != items.get(other)?.is_active()
        {
            return None;
        }
        Some(other)
    }

    async fn require(&self, id: &str) -> ClientResult<T> {
        match self.find(id).await {
            Some(record) => Ok(record),
            None => {
                let err = self.not_found(id);
                self.notifier.notify(Toast::error(err.user_message()));
                Err(err)
            }
        }
    }

    fn not_found(&self, id: &str) -> ClientError {
        ClientError::NotFound(format!("{} {}", T::LABEL, id))
    }

    /// Drive one action through its phases.
    ///
    /// `request` is not polled until validation has passed, so a rejected
    /// action never reaches the network.
    async fn run<R, F>(
        &self,
        action: &'static str,
        claim: Claim,
        check: Result<(), SharedError>,
        request: F,
        refetch: Refetch,
    ) -> ClientResult<R>
    where
        F: Future<Output = ClientResult<R>>,
    {
        let mut phase = PhaseRun::start(action, &self.phase);

        if let Err(e) = check {
            phase.advance(ActionPhase::Rejected);
            let err = ClientError::from(e);
            tracing::warn!(resource = T::LABEL, action, error = %err, "Rejected");
            self.notifier.notify(Toast::error(err.user_message()));
            phase.advance(ActionPhase::Idle);
            return Err(err);
        }

        phase.advance(ActionPhase::Submitting);
        let result = request.await;

        match &result {
            Ok(_) => {
                phase.advance(ActionPhase::Succeeded);
                self.notifier.notify(Toast::success(format!(
                    "{} {}",
                    capitalize(T::LABEL),
                    past_tense(action)
                )));
            }
            Err(e) => {
                phase.advance(ActionPhase::Failed);
                tracing::warn!(resource = T::LABEL, action, error = %e, "Action failed");
                self.notifier.notify(Toast::error(e.user_message()));
            }
        }

        if result.is_ok() || refetch == Refetch::Always {
            phase.advance(ActionPhase::Refetching);
            // The mutation outcome stands; a failed refetch is reported
            // by refresh itself.
            let _ = self.refresh().await;
        }

        phase.advance(ActionPhase::Idle);
        drop(claim);
        result
    }
}

fn past_tense(action: &str) -> &'static str {
    match action {
        "create" => "created",
        "update" => "updated",
        "delete" => "deleted",
        "move" => "moved",
        _ => "saved",
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
