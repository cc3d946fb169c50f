use recall_core::MemoryRecord;
use tracing::debug;

use crate::request::{Command, RequestId, RequestSeq};
use crate::resource::Resource;

/// Shows one memory, fetched by identifier.
#[derive(Debug)]
pub struct MemoryDetailView {
    id: i64,
    pending: Option<RequestId>,
    pub record: Resource<MemoryRecord>,
}

impl MemoryDetailView {
    /// Mounts the view for `id`, returning the fetch it needs.
    pub fn mount(id: i64, seq: &mut RequestSeq) -> (Self, Command) {
        let request = seq.next_id();
        let view = Self { id, pending: Some(request), record: Resource::Loading };
        (view, Command::FetchMemory { request, id })
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// Re-keys the view. No fetch is issued when the id is unchanged.
    pub fn set_id(&mut self, id: i64, seq: &mut RequestSeq) -> Option<Command> {
        if id == self.id {
            return None;
        }
        let request = seq.next_id();
        self.id = id;
        self.pending = Some(request);
        self.record = Resource::Loading;
        Some(Command::FetchMemory { request, id })
    }

    /// Applies a fetch outcome. Responses for superseded requests are dropped.
    pub fn apply(&mut self, request: RequestId, outcome: Result<MemoryRecord, String>) -> bool {
        if self.pending != Some(request) {
            debug!("Discarding stale memory response {:?} (view is on {})", request, self.id);
            return false;
        }
        self.pending = None;
        self.record = Resource::from_outcome(outcome);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: i64, content: &str) -> MemoryRecord {
        MemoryRecord {
            id,
            user_id: 3,
            content: content.into(),
            created_at: "2024-05-01T10:00:00Z".into(),
        }
    }

    fn request_of(cmd: &Command) -> RequestId {
        match cmd {
            Command::FetchMemory { request, .. } => *request,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[test]
    fn mount_requests_the_identifier() {
        let mut seq = RequestSeq::default();
        let (view, cmd) = MemoryDetailView::mount(7, &mut seq);
        assert!(matches!(cmd, Command::FetchMemory { id: 7, .. }));
        assert!(view.record.is_loading());
    }

    #[test]
    fn same_id_does_not_refetch() {
        let mut seq = RequestSeq::default();
        let (mut view, _) = MemoryDetailView::mount(7, &mut seq);
        assert_eq!(view.set_id(7, &mut seq), None);
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut seq = RequestSeq::default();
        let (mut view, first) = MemoryDetailView::mount(7, &mut seq);
        let second = view.set_id(8, &mut seq).unwrap();

        assert!(!view.apply(request_of(&first), Ok(record(7, "old"))));
        assert!(view.record.is_loading());

        assert!(view.apply(request_of(&second), Ok(record(8, "new"))));
        assert_eq!(view.record.loaded().map(|r| r.content.as_str()), Some("new"));
    }

    #[test]
    fn failure_is_an_error_state() {
        let mut seq = RequestSeq::default();
        let (mut view, cmd) = MemoryDetailView::mount(7, &mut seq);
        view.apply(request_of(&cmd), Err("connection refused".into()));
        assert_eq!(view.record, Resource::Error("connection refused".into()));
    }

    #[test]
    fn response_applies_once() {
        let mut seq = RequestSeq::default();
        let (mut view, cmd) = MemoryDetailView::mount(7, &mut seq);
        assert!(view.apply(request_of(&cmd), Ok(record(7, "hello"))));
        assert!(!view.apply(request_of(&cmd), Err("late duplicate".into())));
        assert!(view.record.loaded().is_some());
    }
}
