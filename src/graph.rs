//! Compilation Graph Intake for the Argus Analyzer
//!
//! Serde mirror of what the JS plugin shell hands over the bridge: the
//! chunk list, the modules each chunk owns, and the compilation's entry
//! records. Everything is optional-friendly - synthetic wrapper modules
//! have no originating request, and a module whose source extraction
//! threw on the JS side simply arrives without a `source` payload.

use serde::{Deserialize, Serialize};

/// Bundler module ids are numbers in production builds and request
/// strings in development builds. Both key the same table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModuleId {
    Number(i64),
    Name(String),
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleId::Number(n) => write!(f, "{}", n),
            ModuleId::Name(s) => write!(f, "{}", s),
        }
    }
}

/// Raw module text, as produced by `module.source().sourceAndMap()` on
/// the JS side. `source` is absent when that call threw.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceBundle {
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    #[serde(default)]
    pub module: Option<Module>,
}

/// One build-graph node. Entries reuse this shape: an entry either is a
/// module (it has `user_request`) or owns dependency edges to exactly
/// the modules that constitute it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default)]
    pub id: Option<ModuleId>,
    #[serde(default)]
    pub user_request: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub source: Option<SourceBundle>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    #[serde(default)]
    pub modules: Vec<Module>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Compilation {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    #[serde(default)]
    pub entries: Vec<Module>,
    /// Child compilations (html plugins, workers) are not analyzed.
    #[serde(default)]
    pub is_child: bool,
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════
