use crate::*;

/// One running game: resolver, avatar, and view, driven by discrete external
/// events.
///
/// Everything runs to completion synchronously on the caller's thread, and
/// every override write is persisted before the mutating call returns, so a
/// resolve issued after a click always reflects it.
#[derive(Debug)]
pub struct GameSession<S: BlobStore> {
    rules: GameRules,
    world: TokenWorld<S>,
    player: PlayerState,
    view: ViewControl,
    move_count: u32,
    won: bool,
}

impl<S: BlobStore> GameSession<S> {
    /// Starts a session at `origin`, loading persisted overrides from
    /// `backend`. Fails if a persisted blob exists but cannot be parsed.
    pub fn start(rules: GameRules, seed: u64, origin: GeoPos, backend: S) -> Result<Self> {
        let world = TokenWorld::load(&rules, seed, backend)?;
        log::debug!(
            "session start: seed {seed}, {} overrides",
            world.overrides().len()
        );
        Ok(Self::with_world(rules, world, origin))
    }

    /// Starts a session over an already-loaded world.
    pub fn with_world(rules: GameRules, world: TokenWorld<S>, origin: GeoPos) -> Self {
        Self {
            rules,
            world,
            player: PlayerState::at(origin),
            view: ViewControl::new(origin),
            move_count: 0,
            won: false,
        }
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn world(&self) -> &TokenWorld<S> {
        &self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    /// Successful pickups and crafts so far.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Whether any craft of this session reached the target value.
    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn resolve(&self, cell: CellId) -> CellState {
        self.world.resolve(cell)
    }

    /// Cells the renderer should draw for `region`, in row-major order.
    ///
    /// Recomputed wholesale on every call; visual diffing is the renderer's
    /// concern.
    pub fn visible_cells(&self, region: Region) -> Vec<(CellId, CellState)> {
        self.world.resolve_region(region).collect()
    }

    /// Center the next visible region should be built around, per the
    /// current view mode.
    pub fn visible_center(&self) -> GeoPos {
        self.view.effective_center(self.player.pos)
    }

    pub fn toggle_mode(&mut self) -> ViewMode {
        let mode = self.view.toggle(self.player.pos);
        log::debug!("view mode: {mode:?}");
        mode
    }

    /// One discrete movement intent from the input source.
    pub fn step(&mut self, direction: Direction) -> GeoPos {
        let (dlat, dlng) = direction.delta(self.rules.step);
        self.move_by(dlat, dlng)
    }

    /// Moves the avatar, or pans only the view while detached. Returns the
    /// new effective center for the next region query.
    pub fn move_by(&mut self, dlat: f64, dlng: f64) -> GeoPos {
        match self.view.mode() {
            ViewMode::PlayerCentered => {
                self.player.pos = self.player.pos.translated(dlat, dlng);
            }
            ViewMode::FreeView => self.view.pan(dlat, dlng),
        }
        self.visible_center()
    }

    /// Applies one click on a resolved cell.
    ///
    /// Reach is measured from the player's cell whatever the view mode; a
    /// detached view never brings the avatar closer to anything.
    pub fn click(&mut self, cell: CellId) -> Result<ClickOutcome> {
        use ClickOutcome::*;

        if self.player.cell().chebyshev(cell) > self.rules.reach {
            return Ok(RejectedTooFar);
        }

        let outcome = match (self.player.held, self.world.resolve(cell)) {
            (None, CellState::Empty) => RejectedEmpty,
            (None, CellState::Occupied(value)) => {
                self.world.clear(cell)?;
                self.player.held = Some(value);
                PickedUp(value)
            }
            (Some(held), CellState::Occupied(value)) if value == held => {
                let crafted = held.saturating_mul(2);
                self.world.place(cell, crafted)?;
                self.player.held = None;
                let won = held < self.rules.target && crafted >= self.rules.target;
                Crafted {
                    value: crafted,
                    won,
                }
            }
            (Some(_), _) => RejectedMismatch,
        };

        if outcome.has_update() {
            self.move_count = self.move_count.saturating_add(1);
            self.won |= outcome.is_win();
            log::debug!("click {cell:?}: {outcome:?}");
        }

        Ok(outcome)
    }
}
