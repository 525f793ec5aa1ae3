use std::marker::PhantomData;

use crate::pairwise;

#[repr(u8)]
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Match,
    Mismatch,
    Equivalent,
}

pub trait Classifier {
    type Symbol;

    fn classify(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Type;
}

pub struct Equality<Symbol> {
    phantom: PhantomData<Symbol>,
}

impl<Symbol> Equality<Symbol> {
    pub fn new() -> Self {
        Self {
            phantom: Default::default(),
        }
    }
}

impl<Symbol> Default for Equality<Symbol> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Symbol: PartialEq> Classifier for Equality<Symbol> {
    type Symbol = Symbol;

    fn classify(&self, s1: &Self::Symbol, s2: &Self::Symbol) -> Type {
        if *s1 == *s2 {
            Type::Match
        } else {
            Type::Mismatch
        }
    }
}

impl From<Type> for pairwise::Op {
    fn from(value: Type) -> Self {
        match value {
            Type::Match => pairwise::Op::Match,
            Type::Mismatch => pairwise::Op::Mismatch,
            Type::Equivalent => pairwise::Op::Equivalent,
        }
    }
}
