use std::fmt;

use super::model::Task;

/// The ordered task store.
///
/// Position is the only identity a task has: 0-based here, 1-based
/// (an "ordinal") at the user-facing boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task. Returns the new number of tasks, which is also the
    /// ordinal of the added task.
    pub fn add(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.tasks.get_mut(index)
    }

    /// Replace the task at `index`, returning the previous one.
    pub fn replace(&mut self, index: usize, task: Task) -> Result<Task, IndexError> {
        let len = self.tasks.len();
        let slot = self
            .tasks
            .get_mut(index)
            .ok_or(IndexError::from_index(index, len))?;
        Ok(std::mem::replace(slot, task))
    }

    /// Remove and return the task at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Task, IndexError> {
        if index >= self.tasks.len() {
            return Err(IndexError::from_index(index, self.tasks.len()));
        }
        Ok(self.tasks.remove(index))
    }

    /// Tasks whose description contains `query` literally (case-sensitive),
    /// with their 0-based positions, in store order.
    pub fn find<'a>(&'a self, query: &'a str) -> impl Iterator<Item = (usize, &'a Task)> + 'a {
        self.tasks
            .iter()
            .enumerate()
            .filter(move |(_, task)| task.description().contains(query))
    }

    /// Convert a 1-based ordinal to a 0-based index within bounds.
    pub fn resolve(&self, ordinal: i64) -> Result<usize, IndexError> {
        let len = self.tasks.len();
        if ordinal < 1 || ordinal as u64 > len as u64 {
            return Err(IndexError { ordinal, len });
        }
        Ok((ordinal - 1) as usize)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Read-only view handed to storage when rewriting.
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

/// A task ordinal outside the current list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexError {
    /// The 1-based ordinal that was requested.
    pub ordinal: i64,
    /// Number of tasks at the time of the request.
    pub len: usize,
}

impl IndexError {
    fn from_index(index: usize, len: usize) -> Self {
        Self {
            ordinal: i64::try_from(index).map_or(i64::MAX, |i| i.saturating_add(1)),
            len,
        }
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len == 0 {
            write!(f, "invalid task number {}: the list is empty", self.ordinal)
        } else {
            write!(
                f,
                "invalid task number {}: use a number from 1 to {}",
                self.ordinal, self.len
            )
        }
    }
}

impl std::error::Error for IndexError {}
