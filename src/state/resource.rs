/// Load state of one server-owned resource
#[derive(Clone, Debug, PartialEq)]
pub enum Resource<T> {
    NotLoaded,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::NotLoaded
    }
}

impl<T> Resource<T> {
    pub fn get(&self) -> Option<&T> {
        match self {
            Resource::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Resource::Loaded(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Resource::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// Start a (re)load. Data that is already loaded stays visible.
    pub(crate) fn requested(self) -> Self {
        match self {
            Resource::Loaded(value) => Resource::Loaded(value),
            _ => Resource::Loading,
        }
    }

    /// Record a failed load. Data that is already loaded is kept.
    pub(crate) fn failed(self, reason: String) -> Self {
        match self {
            Resource::Loaded(value) => Resource::Loaded(value),
            _ => Resource::Failed(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_keeps_loaded_data_on_failure() {
        let res = Resource::Loaded(vec![1, 2]).requested().failed("boom".into());
        assert_eq!(res, Resource::Loaded(vec![1, 2]));
    }

    #[test]
    fn it_fails_from_first_load() {
        let res: Resource<Vec<i32>> = Resource::NotLoaded.requested();
        assert_eq!(res, Resource::Loading);
        let res = res.failed("boom".into());
        assert_eq!(res.error(), Some("boom"));
        assert!(res.get().is_none());
    }
}
