// Instead of making a custom trait here I must support Rust builtin traits for containers
// once they are ready: https://internals.rust-lang.org/t/traits-that-should-be-in-std-but-arent/3002
pub trait Alignable {
    type Symbol;

    fn len(&self) -> usize;
    fn at(&self, pos: usize) -> &Self::Symbol;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a, T: Copy> Alignable for &'a [T] {
    type Symbol = T;

    #[inline(always)]
    fn len(&self) -> usize {
        (self as &[Self::Symbol]).len()
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> &Self::Symbol {
        &self[pos]
    }
}

impl<T: Copy> Alignable for Vec<T> {
    type Symbol = T;

    #[inline(always)]
    fn len(&self) -> usize {
        self.len()
    }

    #[inline(always)]
    fn at(&self, pos: usize) -> &Self::Symbol {
        &self[pos]
    }
}
