// src/catalog/chain.rs
//! Evolution trees → flat, fixed-length evolution paths.
//!
//! A tree is rooted at a base species; every root-to-leaf walk is one path.
//! Branching evolutions fan out into several paths sharing a prefix.
//! Paths are always exactly 3 stages: short chains repeat their last stage,
//! longer ones keep their first three.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::SpeciesId;
use crate::error::CatalogError;

pub const PATH_LEN: usize = 3;

/// `(base, mid, final)`. Serializes as a plain JSON array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvolutionPath([SpeciesId; PATH_LEN]);

impl EvolutionPath {
    pub fn new(base: SpeciesId, mid: SpeciesId, last: SpeciesId) -> Self {
        Self([base, mid, last])
    }

    /// Pad (or cut) natural stages to a path. `None` for an empty chain.
    pub fn from_stages(stages: &[SpeciesId]) -> Option<Self> {
        let last = *stages.last()?;
        let mut out = [last; PATH_LEN];
        for (slot, &id) in out.iter_mut().zip(stages) {
            *slot = id;
        }
        Some(Self(out))
    }

    pub fn base(&self) -> SpeciesId { self.0[0] }
    pub fn mid(&self) -> SpeciesId { self.0[1] }
    pub fn last(&self) -> SpeciesId { self.0[2] }

    pub fn stages(&self) -> &[SpeciesId; PATH_LEN] { &self.0 }
}

/// Species reference as embedded in an evolution node.
/// `url` ends in the numeric species id, e.g. `.../pokemon-species/25/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRef {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl SpeciesRef {
    pub fn new(name: &str, url: &str) -> Self {
        Self { name: s!(name), url: s!(url) }
    }

    pub fn id_from_url(&self) -> Option<SpeciesId> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()?
            .parse::<SpeciesId>()
            .ok()
            .filter(|&id| id > 0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionTree {
    pub species: SpeciesRef,
    #[serde(default)]
    pub evolves_to: Vec<EvolutionTree>,
}

impl EvolutionTree {
    pub fn leaf(species: SpeciesRef) -> Self {
        Self { species, evolves_to: Vec::new() }
    }

    pub fn with_children(species: SpeciesRef, evolves_to: Vec<EvolutionTree>) -> Self {
        Self { species, evolves_to }
    }
}

/// Resolves tree nodes to species ids and flattens trees into paths.
pub struct ChainResolver {
    by_name: HashMap<String, SpeciesId>,
}

impl ChainResolver {
    /// Build the case-insensitive name index. On duplicate names the first
    /// id supplied wins, so feed species in ascending id order.
    pub fn new<'n>(names: impl IntoIterator<Item = (SpeciesId, &'n str)>) -> Self {
        let mut by_name = HashMap::new();
        for (id, name) in names {
            by_name.entry(name.trim().to_lowercase()).or_insert(id);
        }
        Self { by_name }
    }

    /// Exact name match first, then the id embedded in the reference url.
    pub fn resolve_id(&self, species: &SpeciesRef) -> Result<SpeciesId, CatalogError> {
        if let Some(&id) = self.by_name.get(&species.name.trim().to_lowercase()) {
            return Ok(id);
        }
        species.id_from_url().ok_or_else(|| CatalogError::UnresolvableSpecies {
            name: species.name.clone(),
            url: species.url.clone(),
        })
    }

    /// Depth-first, children in source order. Paths are appended to `out`;
    /// on error `out` may hold paths from earlier leaves of this tree.
    pub fn resolve(
        &self,
        tree: &EvolutionTree,
        out: &mut Vec<EvolutionPath>,
    ) -> Result<(), CatalogError> {
        let mut work: Vec<(&EvolutionTree, Vec<SpeciesId>)> = vec![(tree, Vec::new())];

        while let Some((node, mut so_far)) = work.pop() {
            so_far.push(self.resolve_id(&node.species)?);

            if node.evolves_to.is_empty() {
                if let Some(path) = EvolutionPath::from_stages(&so_far) {
                    out.push(path);
                }
                continue;
            }
            // Reversed so the first child is popped first.
            for child in node.evolves_to.iter().rev() {
                work.push((child, so_far.clone()));
            }
        }
        Ok(())
    }

    pub fn resolve_all(&self, tree: &EvolutionTree) -> Result<Vec<EvolutionPath>, CatalogError> {
        let mut out = Vec::new();
        self.resolve(tree, &mut out)?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(name: &str, id: u32) -> SpeciesRef {
        SpeciesRef::new(name, &format!("https://pokeapi.co/api/v2/pokemon-species/{id}/"))
    }

    fn resolver() -> ChainResolver {
        ChainResolver::new([
            (1, "Bulbasaur"), (2, "Ivysaur"), (3, "Venusaur"),
            (19, "Rattata"), (20, "Raticate"),
            (133, "Eevee"), (134, "Vaporeon"), (135, "Jolteon"), (136, "Flareon"),
            (128, "Tauros"),
        ])
    }

    #[test]
    fn pads_short_chains() {
        assert_eq!(EvolutionPath::from_stages(&[19, 20]), Some(EvolutionPath::new(19, 20, 20)));
        assert_eq!(EvolutionPath::from_stages(&[128]), Some(EvolutionPath::new(128, 128, 128)));
        assert_eq!(EvolutionPath::from_stages(&[]), None);
        // Anything past the third stage is cut
        assert_eq!(EvolutionPath::from_stages(&[1, 2, 3, 4]), Some(EvolutionPath::new(1, 2, 3)));
    }

    #[test]
    fn linear_three_stage() {
        let tree = EvolutionTree::with_children(
            r("bulbasaur", 1),
            vec![EvolutionTree::with_children(
                r("ivysaur", 2),
                vec![EvolutionTree::leaf(r("venusaur", 3))],
            )],
        );
        assert_eq!(resolver().resolve_all(&tree).unwrap(), vec![EvolutionPath::new(1, 2, 3)]);
    }

    #[test]
    fn branching_fans_out_in_source_order() {
        let tree = EvolutionTree::with_children(
            r("eevee", 133),
            vec![
                EvolutionTree::leaf(r("vaporeon", 134)),
                EvolutionTree::leaf(r("jolteon", 135)),
                EvolutionTree::leaf(r("flareon", 136)),
            ],
        );
        assert_eq!(
            resolver().resolve_all(&tree).unwrap(),
            vec![
                EvolutionPath::new(133, 134, 134),
                EvolutionPath::new(133, 135, 135),
                EvolutionPath::new(133, 136, 136),
            ]
        );
    }

    #[test]
    fn name_match_beats_url() {
        // url says 999 but the name is known
        let tree = EvolutionTree::leaf(SpeciesRef::new("TAUROS", "https://x/pokemon-species/999/"));
        assert_eq!(resolver().resolve_all(&tree).unwrap(), vec![EvolutionPath::new(128, 128, 128)]);
    }

    #[test]
    fn falls_back_to_url_id() {
        let tree = EvolutionTree::leaf(SpeciesRef::new("mr-mime", "https://x/pokemon-species/122/"));
        assert_eq!(resolver().resolve_all(&tree).unwrap(), vec![EvolutionPath::new(122, 122, 122)]);
    }

    #[test]
    fn unresolvable_is_an_error() {
        let tree = EvolutionTree::with_children(
            r("rattata", 19),
            vec![EvolutionTree::leaf(SpeciesRef::new("ghost", "not-a-url"))],
        );
        let err = resolver().resolve_all(&tree).unwrap_err();
        assert!(matches!(err, CatalogError::UnresolvableSpecies { ref name, .. } if name == "ghost"));
    }
}
