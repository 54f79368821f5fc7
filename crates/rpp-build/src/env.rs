use std::collections::{BTreeMap, HashMap};

/// Every environment variable the resolver reads.
pub const CONSUMED_ENV_VARS: &[&str] = &[
    "BUILD_TESTS",
    "BUILD_WITH_MEM_SAFETY",
    "BUILD_WITH_THREAD_SAFETY",
    "BUILD_WITH_CODE_COVERAGE",
    "CXX17",
    "CXX20",
    "APPVEYOR",
];

/// Read-only key/value lookup the resolver pulls flags from.
///
/// Resolution never touches `std::env` directly, so any map can stand in
/// for the process environment.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Snapshot of the consumed variables from the current process environment.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    vars: HashMap<String, String>,
}

impl ProcessEnv {
    /// Captures [`CONSUMED_ENV_VARS`] as they are right now. Later changes to
    /// the process environment are not observed.
    pub fn snapshot() -> Self {
        let vars = CONSUMED_ENV_VARS
            .iter()
            .filter_map(|key| std::env::var(key).ok().map(|v| (key.to_string(), v)))
            .collect();

        Self { vars }
    }

    pub fn vars(&self) -> &HashMap<String, String> {
        &self.vars
    }
}

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
