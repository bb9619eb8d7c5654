use mealcal_recipe::{RecipeGroup, RecipeItem};
use rand::Rng;
use rand::seq::SliceRandom;

/// Handle to a group owned by a [`RecipePool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Draw-without-replacement pool of recipe groups with a scratch area.
///
/// Both the group order and each group's items behave as randomized stacks:
/// [`shuffle`](Self::shuffle) reorders them in place and draws always take
/// from the end. A drawn group moves from `active` to `scratch`; once `active`
/// runs dry, [`reset`](Self::reset) puts the scratch groups back in play.
///
/// Every live group sits in exactly one of `active` or `scratch`. A group whose
/// items are all consumed is retired on the next reset and never drawn again.
#[derive(Debug, Clone)]
pub struct RecipePool {
    groups: Vec<RecipeGroup>,
    active: Vec<GroupId>,
    scratch: Vec<GroupId>,
}

impl RecipePool {
    pub fn new(groups: Vec<RecipeGroup>) -> Self {
        let active = groups
            .iter()
            .enumerate()
            .filter(|(_, group)| !group.is_exhausted())
            .map(|(index, _)| GroupId(index))
            .collect();

        Self {
            groups,
            active,
            scratch: Vec::new(),
        }
    }

    /// Shuffles the draw order of the active groups, then the items inside
    /// each active group, consuming `rng` in that order.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.active.shuffle(rng);

        for id in &self.active {
            self.groups[id.0].items.shuffle(rng);
        }
    }

    /// Takes the next active group and records it in scratch.
    ///
    /// Returns `None` when no group is active; callers are expected to check
    /// [`is_empty`](Self::is_empty) and [`reset`](Self::reset) first.
    pub fn pop_group(&mut self) -> Option<GroupId> {
        let id = self.active.pop()?;
        self.scratch.push(id);

        Some(id)
    }

    /// Removes the next item (the last one) from a group.
    pub fn take_item(&mut self, id: GroupId) -> Option<RecipeItem> {
        self.groups.get_mut(id.0)?.pop_item()
    }

    /// Moves every scratch group back into `active` and clears scratch.
    ///
    /// Exhausted groups are dropped instead. Returns how many were retired.
    pub fn reset(&mut self) -> usize {
        let scratch = std::mem::take(&mut self.scratch);
        let before = scratch.len();

        self.active = scratch
            .into_iter()
            .filter(|id| !self.groups[id.0].is_exhausted())
            .collect();

        let retired = before - self.active.len();

        tracing::debug!(
            active = self.active.len(),
            retired,
            "recipe pool reset from scratch"
        );

        retired
    }

    /// Puts a just-drawn group back into `active`.
    ///
    /// With `remove_from_scratch`, the most recent scratch entry (added by the
    /// `pop_group` that drew `id`) is rolled back so the group is not counted
    /// as used for this cycle. Call [`shuffle`](Self::shuffle) afterwards or
    /// the group is drawn again immediately.
    pub fn readmit(&mut self, id: GroupId, remove_from_scratch: bool) {
        if remove_from_scratch {
            let last = self.scratch.pop();
            debug_assert_eq!(last, Some(id), "readmit must follow the pop_group that drew it");
        }

        self.active.push(id);
    }

    /// Number of active groups (not items).
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn scratch_len(&self) -> usize {
        self.scratch.len()
    }

    pub fn active(&self) -> &[GroupId] {
        &self.active
    }

    pub fn scratch(&self) -> &[GroupId] {
        &self.scratch
    }

    pub fn group(&self, id: GroupId) -> &RecipeGroup {
        &self.groups[id.0]
    }

    pub fn is_active(&self, id: GroupId) -> bool {
        self.active.contains(&id)
    }
}
