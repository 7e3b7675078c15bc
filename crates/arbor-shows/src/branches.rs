//! Walker shows: fronts climbing or retreating along branch paths, each
//! leaving a fading trail.

use std::time::Duration;

use arbor_core::helpers::{one_in, reasonable_speed};
use arbor_core::{BranchWalker, FadeController, Show, ShowError};
use arbor_types::color::{random_color, random_color_range};
use arbor_types::{Hsv, TreeShape};
use arbor_world::PixelSpace;
use rand::Rng;
use rand::rngs::SmallRng;

/// Walk every walker `speed` steps, painting each visited pixel and leaving
/// a fader behind it. Walkers that run off the tree are removed and
/// returned.
fn advance_walkers(
    walkers: &mut Vec<BranchWalker>,
    trail: &mut FadeController,
    space: &mut PixelSpace,
    shape: &TreeShape,
    rng: &mut SmallRng,
    fade: f64,
) -> Result<Vec<BranchWalker>, ShowError> {
    let mut finished = Vec::new();
    let mut active = Vec::with_capacity(walkers.len());
    for mut walker in walkers.drain(..) {
        let mut alive = true;
        for _ in 0..walker.speed() {
            walker.draw(space)?;
            trail.add(walker.color(), *walker.coordinate(), 1.0, false, fade);
            if !walker.step(shape, rng) {
                alive = false;
                break;
            }
        }
        if alive {
            active.push(walker);
        } else {
            finished.push(walker);
        }
    }
    *walkers = active;
    Ok(finished)
}

/// Fronts sprouting from the trunk roots and racing out to the tips.
#[derive(Debug, Clone)]
pub struct OutwardBranch {
    rng: SmallRng,
    shape: TreeShape,
    color: Hsv,
    walkers: Vec<BranchWalker>,
    trail: FadeController,
}

impl OutwardBranch {
    /// Display name.
    pub const NAME: &'static str = "OutwardBranch";

    const FRAME: Duration = Duration::from_millis(200);

    /// Create the show around a random base color.
    pub fn new(space: &PixelSpace, mut rng: SmallRng) -> Self {
        let color = random_color(&mut rng, false);
        Self {
            rng,
            shape: space.shape().clone(),
            color,
            walkers: Vec::new(),
            trail: FadeController::new(),
        }
    }
}

impl Show for OutwardBranch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        if one_in(&mut self.rng, 4) {
            let color = random_color_range(&mut self.rng, self.color, 0.1);
            let speed = reasonable_speed(&mut self.rng);
            self.walkers
                .push(BranchWalker::from_center(&self.shape, &mut self.rng, color, speed));
        }

        advance_walkers(
            &mut self.walkers,
            &mut self.trail,
            space,
            &self.shape,
            &mut self.rng,
            0.02,
        )?;
        self.trail.cycle(space, true);
        Ok(Self::FRAME)
    }
}

/// A new front every frame, creeping in from the tips to the center.
#[derive(Debug, Clone)]
pub struct InwardBranch {
    rng: SmallRng,
    shape: TreeShape,
    color: Hsv,
    speed: u32,
    walkers: Vec<BranchWalker>,
    trail: FadeController,
}

impl InwardBranch {
    /// Display name.
    pub const NAME: &'static str = "InwardBranch";

    const FRAME: Duration = Duration::from_millis(200);

    /// Create the show with a random base color and half-speed walkers.
    pub fn new(space: &PixelSpace, mut rng: SmallRng) -> Self {
        let speed = reasonable_speed(&mut rng) / 2;
        let color = random_color(&mut rng, false);
        Self {
            rng,
            shape: space.shape().clone(),
            color,
            speed,
            walkers: Vec::new(),
            trail: FadeController::new(),
        }
    }
}

impl Show for InwardBranch {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        let color = random_color_range(&mut self.rng, self.color, 0.1);
        self.walkers.push(BranchWalker::from_edge(
            &self.shape,
            &mut self.rng,
            color,
            self.speed,
        )?);

        advance_walkers(
            &mut self.walkers,
            &mut self.trail,
            space,
            &self.shape,
            &mut self.rng,
            0.05,
        )?;
        self.trail.cycle(space, true);
        Ok(Self::FRAME)
    }
}

/// Waves of three same-colored fronts; a new wave starts once the last
/// front of the previous one has reached a tip.
#[derive(Debug, Clone)]
pub struct MultipleBranches {
    rng: SmallRng,
    shape: TreeShape,
    color: Hsv,
    walkers: Vec<BranchWalker>,
    trail: FadeController,
}

impl MultipleBranches {
    /// Display name.
    pub const NAME: &'static str = "MultipleBranches";

    const FRAME: Duration = Duration::from_millis(200);

    const WAVE: usize = 3;

    /// Create the show around a random base color.
    pub fn new(space: &PixelSpace, mut rng: SmallRng) -> Self {
        let color = random_color(&mut rng, false);
        Self {
            rng,
            shape: space.shape().clone(),
            color,
            walkers: Vec::new(),
            trail: FadeController::new(),
        }
    }
}

impl Show for MultipleBranches {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        if self.walkers.is_empty() {
            self.color = random_color_range(&mut self.rng, self.color, 0.05);
            let speed = reasonable_speed(&mut self.rng);
            for _ in 0..Self::WAVE {
                self.walkers.push(BranchWalker::from_center(
                    &self.shape,
                    &mut self.rng,
                    self.color,
                    speed,
                ));
            }
        }

        advance_walkers(
            &mut self.walkers,
            &mut self.trail,
            space,
            &self.shape,
            &mut self.rng,
            0.05,
        )?;
        self.trail.cycle(space, true);
        Ok(Self::FRAME)
    }
}

/// Fronts retreat from the tips; each one that reaches the center bounces
/// back out along a fresh random path in the same color.
#[derive(Debug, Clone)]
pub struct InOutBranches {
    rng: SmallRng,
    shape: TreeShape,
    color: Hsv,
    speed: u32,
    walkers: Vec<BranchWalker>,
    trail: FadeController,
}

impl InOutBranches {
    /// Display name.
    pub const NAME: &'static str = "InOutBranches";

    const FRAME: Duration = Duration::from_millis(100);

    /// Create the show with a random base color and a slow walker speed.
    pub fn new(space: &PixelSpace, mut rng: SmallRng) -> Self {
        let speed = rng.random_range(1..=4);
        let color = random_color(&mut rng, false);
        Self {
            rng,
            shape: space.shape().clone(),
            color,
            speed,
            walkers: Vec::new(),
            trail: FadeController::new(),
        }
    }

    /// Fronts currently moving.
    pub fn walkers(&self) -> &[BranchWalker] {
        &self.walkers
    }
}

impl Show for InOutBranches {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn next_frame(&mut self, space: &mut PixelSpace) -> Result<Duration, ShowError> {
        if one_in(&mut self.rng, 4) {
            let color = random_color_range(&mut self.rng, self.color, 0.05);
            self.walkers.push(BranchWalker::from_edge(
                &self.shape,
                &mut self.rng,
                color,
                self.speed,
            )?);
        }

        let finished = advance_walkers(
            &mut self.walkers,
            &mut self.trail,
            space,
            &self.shape,
            &mut self.rng,
            0.1,
        )?;
        for walker in finished.iter().filter(|w| !w.moving_outward()) {
            self.walkers.push(BranchWalker::from_center(
                &self.shape,
                &mut self.rng,
                walker.color(),
                self.speed,
            ));
        }

        self.trail.cycle(space, true);
        Ok(Self::FRAME)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn space() -> PixelSpace {
        PixelSpace::build(TreeShape::default()).unwrap()
    }

    fn lit(space: &PixelSpace) -> usize {
        space.pixels().filter(|p| p.next_color() != Hsv::BLACK).count()
    }

    #[test]
    fn advance_walkers_retires_exhausted_fronts() {
        let mut space = space();
        let shape = space.shape().clone();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut trail = FadeController::new();
        let mut walkers = vec![
            BranchWalker::from_center(&shape, &mut rng, Hsv::saturated(0), 200),
            BranchWalker::from_center(&shape, &mut rng, Hsv::saturated(0), 5),
        ];

        let finished =
            advance_walkers(&mut walkers, &mut trail, &mut space, &shape, &mut rng, 0.1).unwrap();
        assert_eq!(finished.len(), 1);
        assert_eq!(walkers.len(), 1);
        // 142 pixels on the finished path, 5 on the live one.
        assert_eq!(trail.len(), shape.path_length() + 5);
    }

    #[test]
    fn outward_branch_lights_the_tree() {
        let mut space = space();
        let mut show = OutwardBranch::new(&space, SmallRng::seed_from_u64(2));
        for _ in 0..40 {
            show.next_frame(&mut space).unwrap();
        }
        assert!(lit(&space) > 0);
    }

    #[test]
    fn inward_branch_adds_a_front_every_frame() {
        let mut space = space();
        let mut show = InwardBranch::new(&space, SmallRng::seed_from_u64(3));
        show.next_frame(&mut space).unwrap();
        assert!(lit(&space) > 0);
        assert!(show.walkers.iter().all(|w| !w.moving_outward()));
        for _ in 0..50 {
            show.next_frame(&mut space).unwrap();
        }
    }

    #[test]
    fn multiple_branches_starts_a_new_wave_when_done() {
        let mut space = space();
        let mut show = MultipleBranches::new(&space, SmallRng::seed_from_u64(4));
        show.next_frame(&mut space).unwrap();
        assert_eq!(show.walkers.len(), MultipleBranches::WAVE);
        let wave_color = show.color;
        assert!(show.walkers.iter().all(|w| w.color() == wave_color));

        let mut waves = 1;
        for _ in 0..100 {
            if show.walkers.is_empty() {
                waves += 1;
            }
            show.next_frame(&mut space).unwrap();
        }
        assert!(waves >= 2, "only {waves} wave(s)");
    }

    #[test]
    fn in_out_branches_bounce_back_from_the_center() {
        let mut space = space();
        let mut show = InOutBranches::new(&space, SmallRng::seed_from_u64(5));
        let mut saw_outward = false;
        for _ in 0..2000 {
            show.next_frame(&mut space).unwrap();
            if show.walkers().iter().any(BranchWalker::moving_outward) {
                saw_outward = true;
                break;
            }
        }
        assert!(saw_outward);
    }
}
