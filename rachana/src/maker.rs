//! Scenario maker node
//!
//! Owns the configuration, the random generator and the queue of pending
//! scenarios.
//!
//! # State Machine
//!
//! ```text
//!            seed(v)                    next_scenario (queue non-empty)
//!   Idle ───────────► Ready ◄──────────────────────────┐
//!                      │  └────────────────────────────┘
//!                      │ next_scenario takes the last one
//!                      ▼
//!                  Exhausted ──► every next_scenario replies `finished`
//!                      │
//!                      └── seed(v) ──► Ready
//! ```
//!
//! A seed event regenerates every configured map's scenarios:
//! load map → relabel (→ pad) → per instance: place robots → decorate →
//! assemble → queue. The batch is committed only if every map succeeds.

use crate::config::Config;
use crate::error::Result;
use crate::map::{MapSource, PoseSampler, TileMap};
use crate::placement::{DecorationParams, PlacementParams, place_decorations, place_robots};
use crate::protocol::{InboundMessage, Node, OutboundMessage};
use crate::rng::ScenarioRng;
use crate::scenario::{Scenario, assemble_scenario, scenario_name};
use std::collections::VecDeque;

/// Lifecycle state of the scenario maker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// No seed received yet
    Idle,
    /// Seeded, scenarios may be pending
    Ready,
    /// Queue drained; replies `finished` until reseeded
    Exhausted,
}

/// Stateful scenario generator serving one scenario per request
pub struct ScenarioMaker<M: MapSource, S: PoseSampler> {
    config: Config,
    maps: M,
    sampler: S,
    rng: ScenarioRng,
    pending: VecDeque<Scenario>,
    state: NodeState,
}

impl<M: MapSource, S: PoseSampler> ScenarioMaker<M, S> {
    /// Create a maker. The configuration is validated and fixed from here on.
    pub fn new(config: Config, maps: M, sampler: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            maps,
            sampler,
            rng: ScenarioRng::new(0),
            pending: VecDeque::new(),
            state: NodeState::Idle,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Number of scenarios waiting to be served
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Reseed the generator and regenerate all configured scenarios
    pub fn on_seed(&mut self, seed: u64) -> Result<()> {
        log::info!("seed({})", seed);
        self.rng = ScenarioRng::new(seed);

        let batch = self.create_scenarios()?;
        if !self.config.generation.accumulate_on_reseed {
            self.pending.clear();
        }
        self.pending.extend(batch);
        self.state = if self.pending.is_empty() {
            NodeState::Exhausted
        } else {
            NodeState::Ready
        };

        log::info!("{} scenarios pending", self.pending.len());
        Ok(())
    }

    /// Dispense the oldest pending scenario, or `None` when there is none
    pub fn next_scenario(&mut self) -> Option<Scenario> {
        let scenario = self.pending.pop_front();
        match &scenario {
            Some(s) => log::info!("Sending scenario {}", s.scenario_name),
            None => log::info!("No scenarios left, sending finished"),
        }
        if self.pending.is_empty() && self.state != NodeState::Idle {
            self.state = NodeState::Exhausted;
        }
        scenario
    }

    fn create_scenarios(&mut self) -> Result<Vec<Scenario>> {
        let generation = &self.config.generation;
        let mut batch = Vec::with_capacity(generation.maps.len() * generation.scenarios_per_map);

        for map_name in &generation.maps {
            self.maps.ensure_available(map_name)?;
            let text = self.maps.load_map_description(map_name)?;

            let mut map = TileMap::from_yaml(&text)?.relabel_surface();
            if self.config.map.pad_border {
                map = map.pad_border();
            }
            let environment = map.to_yaml()?;

            let placement =
                PlacementParams::from_config(&self.config.placement, self.config.robots.total());
            let decorations = DecorationParams::from_config(
                &self.config.decorations,
                self.config.placement.max_attempts,
            );

            for index in 0..generation.scenarios_per_map {
                let name = scenario_name(map_name, index);
                let placed = place_robots(&map, &self.sampler, &placement, &mut self.rng)?;
                let poses: Vec<_> = placed.iter().map(|p| p.pose).collect();

                let environment = if decorations.count > 0 {
                    place_decorations(&map, &poses, &decorations, &mut self.rng)?.to_yaml()?
                } else {
                    environment.clone()
                };

                batch.push(assemble_scenario(
                    name,
                    environment,
                    &self.config.robots,
                    &self.config.protocols,
                    &poses,
                )?);
            }
            log::debug!(
                "Generated {} scenarios for map {}",
                generation.scenarios_per_map,
                map_name
            );
        }

        Ok(batch)
    }
}

impl<M: MapSource, S: PoseSampler> Node for ScenarioMaker<M, S> {
    fn handle(&mut self, msg: InboundMessage) -> Result<Option<OutboundMessage>> {
        match msg {
            InboundMessage::Seed(seed) => {
                self.on_seed(seed)?;
                Ok(None)
            }
            InboundMessage::NextScenario => Ok(Some(match self.next_scenario() {
                Some(scenario) => OutboundMessage::Scenario(scenario),
                None => OutboundMessage::Finished,
            })),
        }
    }
}
