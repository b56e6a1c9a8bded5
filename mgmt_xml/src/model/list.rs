//! Ordered, append-only command sequence
use super::operation::Operation;
use crate::config::compile_time::emitter::MAX_OPERATIONS;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Command list limit of {max} operations exceeded")]
pub struct CapacityError {
    pub max: usize,
}

/// Commands in the order the executor must apply them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OperationList {
    operations: Vec<Operation>,
    #[serde(skip)]
    limit: usize,
}

impl Default for OperationList {
    fn default() -> Self {
        Self::new()
    }
}

impl OperationList {
    pub fn new() -> Self {
        Self::with_limit(MAX_OPERATIONS)
    }

    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            operations: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, operation: Operation) -> Result<(), CapacityError> {
        if self.operations.len() >= self.limit {
            return Err(CapacityError { max: self.limit });
        }
        self.operations.push(operation);
        Ok(())
    }

    /// Append every command of `other`, in order
    pub fn extend_from(&mut self, other: OperationList) -> Result<(), CapacityError> {
        if self.operations.len() + other.operations.len() > self.limit {
            return Err(CapacityError { max: self.limit });
        }
        self.operations.extend(other.operations);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Operation> {
        self.operations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.operations.iter()
    }

    pub fn as_slice(&self) -> &[Operation] {
        &self.operations
    }

    pub fn into_vec(self) -> Vec<Operation> {
        self.operations
    }
}

impl<'a> IntoIterator for &'a OperationList {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PathAddress;

    fn op(name: &str) -> Operation {
        Operation::add(PathAddress::root().append("security-realm", name))
    }

    #[test]
    fn test_push_keeps_order() {
        let mut list = OperationList::new();
        list.push(op("a")).unwrap();
        list.push(op("b")).unwrap();

        let names: Vec<_> = list.iter().map(|o| o.address.to_string()).collect();
        assert_eq!(names, vec!["/security-realm=a", "/security-realm=b"]);
    }

    #[test]
    fn test_limit_is_enforced() {
        let mut list = OperationList::with_limit(2);
        list.push(op("a")).unwrap();
        list.push(op("b")).unwrap();
        assert_eq!(list.push(op("c")), Err(CapacityError { max: 2 }));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_extend_from_appends_after_existing() {
        let mut list = OperationList::new();
        list.push(op("existing")).unwrap();

        let mut local = OperationList::new();
        local.push(op("new")).unwrap();
        list.extend_from(local).unwrap();

        assert_eq!(list.get(0), Some(&op("existing")));
        assert_eq!(list.get(1), Some(&op("new")));
    }

    #[test]
    fn test_extend_over_limit_leaves_list_untouched() {
        let mut list = OperationList::with_limit(1);
        list.push(op("a")).unwrap();

        let mut local = OperationList::new();
        local.push(op("b")).unwrap();
        assert!(list.extend_from(local).is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_serializes_as_array() {
        let mut list = OperationList::new();
        list.push(op("a")).unwrap();
        let json: serde_json::Value = serde_json::to_value(&list).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["address"][0]["security-realm"], "a");
    }
}
