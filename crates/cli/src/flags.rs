use clap::ValueEnum;
use knowcode_context::ContextKind;

#[derive(Copy, Clone, ValueEnum)]
pub(crate) enum RegionKindFlag {
    Function,
    Variable,
    Class,
}

impl RegionKindFlag {
    pub(crate) const fn as_domain(self) -> ContextKind {
        match self {
            RegionKindFlag::Function => ContextKind::Function,
            RegionKindFlag::Variable => ContextKind::Variable,
            RegionKindFlag::Class => ContextKind::Class,
        }
    }
}
