/// Monotonic counter stamped onto every scheduled timer.
///
/// A timer only applies its effect when the generation it carries is still
/// the current one for its slot; bumping the counter invalidates everything
/// scheduled before.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn bump(&mut self) -> Generation {
        self.0 = self.0.wrapping_add(1);
        *self
    }

    pub fn is_current(&self, scheduled: Generation) -> bool {
        *self == scheduled
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::Generation;

    #[test]
    fn bump_invalidates_previous() {
        let mut current = Generation::default();
        let first = current.bump();
        assert!(current.is_current(first));
        current.bump();
        assert!(!current.is_current(first));
    }
}
