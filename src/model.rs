pub mod entity {
    use std::fmt;

    /// Identifier supplied by the input catalogs.
    pub type Number = u32;
    /// 0-based position in a catalog.
    pub type Index = usize;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Individual {
        pub number: Number,
        pub name: String,
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct Resource {
        pub number: Number,
        pub title: String,
    }

    impl Individual {
        pub fn new(number: Number, name: impl Into<String>) -> Individual {
            Individual { number, name: name.into() }
        }
    }

    impl Resource {
        pub fn new(number: Number, title: impl Into<String>) -> Resource {
            Resource { number, title: title.into() }
        }
    }

    impl fmt::Display for Individual {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "*** {}", self.name)
        }
    }

    impl fmt::Display for Resource {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}. {}", self.number, self.title)
        }
    }
}


pub mod team {
    use super::entity::{Individual, Number, Resource};

    /// A resource paired with the numbers of the individuals that must work on it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FixedBinding {
        pub resource: Number,
        pub members: Vec<Number>,
    }

    impl FixedBinding {
        pub fn new(resource: Number, members: impl Into<Vec<Number>>) -> FixedBinding {
            FixedBinding { resource, members: members.into() }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Team {
        pub resource: Resource,
        pub members: Vec<Individual>,
    }

    impl Team {
        pub fn len(&self) -> usize {
            self.members.len()
        }

        pub fn is_empty(&self) -> bool {
            self.members.is_empty()
        }
    }

    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Allocation {
        pub teams: Vec<Team>,
    }

    impl Allocation {
        pub fn team_count(&self) -> usize {
            self.teams.len()
        }

        pub fn members(&self) -> impl Iterator<Item = &Individual> + '_ {
            self.teams.iter().flat_map(|team| team.members.iter())
        }

        pub fn resources(&self) -> impl Iterator<Item = &Resource> + '_ {
            self.teams.iter().map(|team| &team.resource)
        }
    }
}
