//! Show lookup by name and the rotation that feeds the driver.

use arbor_core::{Show, ShowSource};
use arbor_world::PixelSpace;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::debug;

use crate::branches::{InOutBranches, InwardBranch, MultipleBranches, OutwardBranch};
use crate::fill::{LightOneUp, TreeTest};
use crate::sparkles::Sparkles;
use crate::waves::{BackForth, Pulse, Radar, Ring};

/// Every show the library knows, in default rotation order.
pub const SHOW_NAMES: [&str; 11] = [
    TreeTest::NAME,
    LightOneUp::NAME,
    BackForth::NAME,
    Pulse::NAME,
    Ring::NAME,
    Radar::NAME,
    Sparkles::NAME,
    OutwardBranch::NAME,
    InwardBranch::NAME,
    MultipleBranches::NAME,
    InOutBranches::NAME,
];

/// Errors building a rotation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A configured show name matches nothing in the library.
    #[error("unknown show {name:?}")]
    UnknownShow {
        /// The name as configured.
        name: String,
    },
}

/// Build the show called `name` (case-insensitive) for `space`.
pub fn create_show(name: &str, space: &PixelSpace, rng: SmallRng) -> Option<Box<dyn Show>> {
    let canonical = canonical_name(name)?;
    let show: Box<dyn Show> = match canonical {
        TreeTest::NAME => Box::new(TreeTest::new(rng)),
        LightOneUp::NAME => Box::new(LightOneUp::new(rng)),
        BackForth::NAME => Box::new(BackForth::new(rng)),
        Pulse::NAME => Box::new(Pulse::new(rng)),
        Ring::NAME => Box::new(Ring::new(rng)),
        Radar::NAME => Box::new(Radar::new(rng)),
        Sparkles::NAME => Box::new(Sparkles::new(space, rng)),
        OutwardBranch::NAME => Box::new(OutwardBranch::new(space, rng)),
        InwardBranch::NAME => Box::new(InwardBranch::new(space, rng)),
        MultipleBranches::NAME => Box::new(MultipleBranches::new(space, rng)),
        InOutBranches::NAME => Box::new(InOutBranches::new(space, rng)),
        _ => return None,
    };
    Some(show)
}

fn canonical_name(name: &str) -> Option<&'static str> {
    SHOW_NAMES
        .iter()
        .copied()
        .find(|known| known.eq_ignore_ascii_case(name.trim()))
}

/// Cycles through a fixed list of shows forever, building each one fresh
/// with its own random generator.
#[derive(Debug, Clone)]
pub struct Rotation {
    names: Vec<&'static str>,
    position: usize,
    rng: SmallRng,
}

impl Rotation {
    /// A rotation over `names`, or over every known show if `names` is
    /// empty. With a `seed`, the whole run is reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownShow`] for the first name that is not
    /// in the library.
    pub fn new(names: &[String], seed: Option<u64>) -> Result<Self, RegistryError> {
        let names = if names.is_empty() {
            SHOW_NAMES.to_vec()
        } else {
            names
                .iter()
                .map(|name| {
                    canonical_name(name).ok_or_else(|| RegistryError::UnknownShow {
                        name: name.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        Ok(Self {
            names,
            position: 0,
            rng,
        })
    }

    /// Show names in rotation order.
    pub fn names(&self) -> &[&'static str] {
        &self.names
    }
}

impl ShowSource for Rotation {
    fn next_show(&mut self, space: &PixelSpace) -> Option<Box<dyn Show>> {
        let name = self.names.get(self.position % self.names.len().max(1)).copied()?;
        self.position = self.position.wrapping_add(1);
        debug!(show = name, "building show");
        create_show(name, space, SmallRng::from_rng(&mut self.rng))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use arbor_types::TreeShape;

    use super::*;

    fn space() -> PixelSpace {
        PixelSpace::build(TreeShape::default()).unwrap()
    }

    #[test]
    fn every_name_builds_and_paints() {
        let mut space = space();
        for (index, name) in SHOW_NAMES.iter().enumerate() {
            let rng = SmallRng::seed_from_u64(index as u64);
            let mut show = create_show(name, &space, rng).unwrap();
            assert_eq!(show.name(), *name);
            show.start(&mut space);
            for _ in 0..5 {
                let frame = show.next_frame(&mut space).unwrap();
                assert!(!frame.is_zero());
            }
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let space = space();
        let show = create_show("sparkles", &space, SmallRng::seed_from_u64(0)).unwrap();
        assert_eq!(show.name(), "Sparkles");
        assert!(create_show("Crosshair", &space, SmallRng::seed_from_u64(0)).is_none());
    }

    #[test]
    fn rotation_cycles_in_order() {
        let space = space();
        let names = vec!["Ring".to_owned(), "radar".to_owned()];
        let mut rotation = Rotation::new(&names, Some(9)).unwrap();
        assert_eq!(rotation.names(), &["Ring", "Radar"]);
        let order: Vec<String> = (0..5)
            .map(|_| rotation.next_show(&space).unwrap().name().to_owned())
            .collect();
        assert_eq!(order, vec!["Ring", "Radar", "Ring", "Radar", "Ring"]);
    }

    #[test]
    fn empty_rotation_means_everything() {
        let rotation = Rotation::new(&[], Some(1)).unwrap();
        assert_eq!(rotation.names().len(), SHOW_NAMES.len());
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = Rotation::new(&["Nope".to_owned()], None).unwrap_err();
        assert_eq!(
            err,
            RegistryError::UnknownShow {
                name: "Nope".to_owned()
            }
        );
    }
}
