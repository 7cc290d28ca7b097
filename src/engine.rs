use crate::error::FsTreeError;
use crate::options::{MarshalOptions, OrphanPolicy};
use crate::scratch::{AddOutcome, ROOT_ID, ScratchTree};
use crate::types::{FsData, FsDuplicateDataNode, FsTree, MarshalResult};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
#[cfg(feature = "logging")]
use tracing;

/// The shallowest duplicate as a childless node, and the level it was found at.
pub type DuplicateReport = (Option<FsTree>, usize);

/// Marshals flat records into a forest using default options.
///
/// Duplicate identifiers never become additional tree nodes; every second or later
/// occurrence is returned in [`MarshalResult::duplicates`].
///
/// # Errors
///
/// [`FsTreeError::MissingData`] when `records` is empty, [`FsTreeError::ReservedId`] when a
/// record uses id 0 (the implicit forest root), and [`FsTreeError::Structural`] when the
/// scratch tree refuses a node it should have accepted.
pub fn marshal_fs_tree(records: &[FsData]) -> Result<MarshalResult, FsTreeError> {
    marshal_fs_tree_with(records, &MarshalOptions::default())
}

pub fn marshal_fs_tree_with(
    records: &[FsData],
    options: &MarshalOptions,
) -> Result<MarshalResult, FsTreeError> {
    build(records, options).map(|(result, _)| result)
}

/// Marshals `records` and returns the ids of duplicates whose node surfaced in the forest.
fn build(
    records: &[FsData],
    options: &MarshalOptions,
) -> Result<(MarshalResult, HashSet<u64>), FsTreeError> {
    if records.is_empty() {
        return Err(FsTreeError::MissingData);
    }
    #[cfg(feature = "logging")]
    tracing::debug!("Marshaling {} file system records", records.len());
    let mut scratch: ScratchTree<&FsData> = ScratchTree::new();
    let mut duplicates = Vec::new();
    for record in records {
        if record.id == ROOT_ID {
            return Err(FsTreeError::ReservedId(record.id));
        }
        let parent_id = if record.id == record.parent_id {
            ROOT_ID
        } else {
            record.parent_id
        };
        if scratch.find(parent_id).is_none() {
            match scratch.add(parent_id, ROOT_ID, None) {
                AddOutcome::Added => {
                    #[cfg(feature = "logging")]
                    tracing::debug!("Placeholder created for parent {}", parent_id);
                }
                outcome => {
                    return Err(FsTreeError::structural(format!(
                        "could not add parent node {} to tree: {}",
                        parent_id, outcome
                    )));
                }
            }
        }
        let outcome = match scratch.find(record.id) {
            Some(node) if node.is_materialized() => {
                #[cfg(feature = "logging")]
                tracing::debug!("Duplicate id {} ({})", record.id, record.name);
                duplicates.push(FsDuplicateDataNode {
                    parent_id,
                    ..FsDuplicateDataNode::from_record(record)
                });
                continue;
            }
            Some(_) => scratch.materialize(record.id, parent_id, record),
            None => scratch.add(record.id, parent_id, Some(record)),
        };
        if outcome != AddOutcome::Added {
            return Err(FsTreeError::structural(format!(
                "could not add node {} to tree: {}",
                record.id, outcome
            )));
        }
    }
    let mut pending: HashMap<u64, Vec<usize>> = HashMap::new();
    for (slot, duplicate) in duplicates.iter().enumerate() {
        pending.entry(duplicate.id).or_default().push(slot);
    }
    let mut assembler = Assembler {
        scratch: &scratch,
        pending,
        duplicates: &mut duplicates,
        resolved: HashSet::new(),
        orphans: options.orphans,
        emitted: 0,
    };
    let forest = assembler.assemble();
    let emitted = assembler.emitted;
    let resolved = assembler.resolved;
    let materialized = scratch.materialized_count();
    if emitted < materialized {
        #[cfg(feature = "logging")]
        tracing::warn!(
            "{} of {} records are unreachable from any root",
            materialized - emitted,
            materialized
        );
    }
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Marshaled {} roots, {} nodes, {} duplicates",
        forest.len(),
        emitted,
        duplicates.len()
    );
    Ok((MarshalResult { forest, duplicates }, resolved))
}

/// Children of one scratch node still to be turned into [`FsTree`] nodes.
struct Frame<'a, I> {
    children: I,
    /// Level given to the children.
    level: usize,
    /// The record owning the children, `None` for the super-root or a spliced placeholder.
    owner: Option<(&'a FsData, usize)>,
    nodes: Vec<FsTree>,
}

impl<I> Frame<'_, I> {
    fn attach(self, siblings: &mut Vec<FsTree>) {
        match self.owner {
            Some((record, level)) => siblings.push(FsTree {
                id: record.id,
                name: record.name.clone(),
                is_dir: record.is_dir,
                level,
                nodes: self.nodes,
            }),
            None => siblings.extend(self.nodes),
        }
    }
}

/// Turns the scratch tree into owned [`FsTree`] nodes and back-fills duplicate levels.
///
/// The descent runs on an explicit stack so input depth is bounded by memory only.
struct Assembler<'a, 'd> {
    scratch: &'a ScratchTree<&'a FsData>,
    pending: HashMap<u64, Vec<usize>>,
    duplicates: &'d mut Vec<FsDuplicateDataNode>,
    /// Duplicate ids whose materialized node made it into the forest.
    resolved: HashSet<u64>,
    orphans: OrphanPolicy,
    emitted: usize,
}

impl Assembler<'_, '_> {
    fn assemble(&mut self) -> Vec<FsTree> {
        let scratch = self.scratch;
        let mut stack = vec![Frame {
            children: scratch.children(scratch.root().id()),
            level: 0,
            owner: None,
            nodes: Vec::new(),
        }];
        while let Some(frame) = stack.last_mut() {
            let level = frame.level;
            let Some(child) = frame.children.next() else {
                let Some(done) = stack.pop() else { break };
                match stack.last_mut() {
                    Some(parent) => done.attach(&mut parent.nodes),
                    None => return done.nodes,
                }
                continue;
            };
            match child.payload() {
                Some(record) => {
                    self.back_fill(child.id(), level);
                    self.emitted += 1;
                    stack.push(Frame {
                        children: scratch.children(child.id()),
                        level: level + 1,
                        owner: Some((*record, level)),
                        nodes: Vec::new(),
                    });
                }
                // placeholders only hang from the super-root
                None => match self.orphans {
                    OrphanPolicy::Promote => stack.push(Frame {
                        children: scratch.children(child.id()),
                        level,
                        owner: None,
                        nodes: Vec::new(),
                    }),
                    OrphanPolicy::Drop => {
                        #[cfg(feature = "logging")]
                        tracing::debug!("Dropping orphans of missing parent {}", child.id());
                    }
                },
            }
        }
        Vec::new()
    }

    fn back_fill(&mut self, id: u64, level: usize) {
        if let Some(slots) = self.pending.remove(&id) {
            for slot in slots {
                self.duplicates[slot].level_found = level;
            }
            self.resolved.insert(id);
        }
    }
}

/// Reports the duplicate whose materialized node sits at the smallest level.
///
/// Ties go to the duplicate found first. Duplicates whose node never surfaced in the forest
/// (inside a cycle, or under an orphan dropped by [`OrphanPolicy::Drop`]) have no level and
/// are not considered. Returns `(None, 0)` when no duplicate qualifies.
pub fn check_duplicate_ids(records: &[FsData]) -> Result<DuplicateReport, FsTreeError> {
    check_duplicate_ids_with(records, &MarshalOptions::default())
}

pub fn check_duplicate_ids_with(
    records: &[FsData],
    options: &MarshalOptions,
) -> Result<DuplicateReport, FsTreeError> {
    let (result, resolved) = build(records, options)?;
    let Some(shallowest) = result
        .duplicates
        .iter()
        .filter(|d| resolved.contains(&d.id))
        .min_by_key(|d| d.level_found)
    else {
        return Ok((None, 0));
    };
    #[cfg(feature = "logging")]
    tracing::debug!(
        "Shallowest duplicate id {} at level {}",
        shallowest.id,
        shallowest.level_found
    );
    let node = FsTree {
        id: shallowest.id,
        name: shallowest.name.clone(),
        is_dir: shallowest.is_dir,
        level: shallowest.level_found,
        nodes: Vec::new(),
    };
    Ok((Some(node), shallowest.level_found))
}

/// Runs [`check_duplicate_ids_with`] over independent record lists.
///
/// Results are in input order. With the `parallel` feature the lists are checked on the
/// rayon thread pool.
#[cfg(not(feature = "parallel"))]
pub fn check_duplicate_ids_batch(
    inputs: &[Vec<FsData>],
    options: &MarshalOptions,
) -> Vec<Result<DuplicateReport, FsTreeError>> {
    inputs
        .iter()
        .map(|records| check_duplicate_ids_with(records, options))
        .collect()
}

#[cfg(feature = "parallel")]
pub fn check_duplicate_ids_batch(
    inputs: &[Vec<FsData>],
    options: &MarshalOptions,
) -> Vec<Result<DuplicateReport, FsTreeError>> {
    inputs
        .par_iter()
        .map(|records| check_duplicate_ids_with(records, options))
        .collect()
}
