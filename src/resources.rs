//! Owner of everything allocated while compiling a network

use crate::functions::MultiFunction;
use std::any::Any;
use std::sync::Arc;

/// Index of a function object in [`Resources`]
pub type FunctionId = usize;

struct NamedFunction {
    name: String,
    function: Arc<dyn MultiFunction>,
}

struct NamedData {
    name: String,
    data: Box<dyn Any + Send + Sync>,
}

/// Arena of named function objects and auxiliary data
///
/// Network nodes only hold [`FunctionId`]s. Entries are never removed, so
/// an id stays valid for the lifetime of the arena.
#[derive(Default)]
pub struct Resources {
    functions: Vec<NamedFunction>,
    data: Vec<NamedData>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of a function object
    pub fn add_function<F>(&mut self, function: F, name: impl Into<String>) -> FunctionId
    where
        F: MultiFunction + 'static,
    {
        self.add_shared(Arc::new(function), name)
    }

    /// Registers a function object that may also be wrapped by others
    pub fn add_shared(&mut self, function: Arc<dyn MultiFunction>, name: impl Into<String>) -> FunctionId {
        let name = name.into();
        log::trace!("Allocating function resource '{}'", name);
        self.functions.push(NamedFunction { name, function });
        self.functions.len() - 1
    }

    pub fn function(&self, id: FunctionId) -> Option<&Arc<dyn MultiFunction>> {
        self.functions.get(id).map(|entry| &entry.function)
    }

    pub fn function_name(&self, id: FunctionId) -> Option<&str> {
        self.functions.get(id).map(|entry| entry.name.as_str())
    }

    /// Stores auxiliary data owned alongside the functions
    pub fn add_data<T: Any + Send + Sync>(&mut self, data: T, name: impl Into<String>) -> usize {
        self.data.push(NamedData {
            name: name.into(),
            data: Box::new(data),
        });
        self.data.len() - 1
    }

    pub fn data<T: Any>(&self, index: usize) -> Option<&T> {
        self.data.get(index)?.data.downcast_ref()
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    pub fn len(&self) -> usize {
        self.functions.len() + self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of all entries, functions first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions
            .iter()
            .map(|entry| entry.name.as_str())
            .chain(self.data.iter().map(|entry| entry.name.as_str()))
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
