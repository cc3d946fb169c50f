/// Load state of anything fetched over the network.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Resource<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    Loading,
    Error(String),
    Loaded(T),
}

impl<T> Resource<T> {
    pub fn from_outcome(outcome: Result<T, String>) -> Self {
        match outcome {
            Ok(value) => Resource::Loaded(value),
            Err(reason) => Resource::Error(reason),
        }
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Resource::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::SearchResult;

    #[test]
    fn starts_idle() {
        assert_eq!(Resource::<Vec<SearchResult>>::default(), Resource::Idle);
    }

    #[test]
    fn outcome_maps_to_state() {
        assert_eq!(Resource::from_outcome(Ok(1)), Resource::Loaded(1));
        assert_eq!(Resource::<i32>::from_outcome(Err("down".into())), Resource::Error("down".into()));
        assert!(Resource::<i32>::Loading.is_loading());
        assert_eq!(Resource::Loaded(2).loaded(), Some(&2));
    }
}
