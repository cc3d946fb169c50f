use recall_core::SearchQuery;

/// Tags a network request so its response can be matched to the view
/// that is still waiting for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Hands out increasing request ids for the whole app session.
#[derive(Debug, Default)]
pub struct RequestSeq {
    next: u64,
}

impl RequestSeq {
    pub fn next_id(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }
}

/// Network work a view asks the event loop to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search { request: RequestId, query: SearchQuery },
    FetchMemory { request: RequestId, id: i64 },
}
