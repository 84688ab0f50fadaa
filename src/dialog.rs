//! Keyed dialog and cutscene playback.
//!
//! Content is a static table: numeric keys are in-level story beats,
//! symbolic keys are full-screen cutscenes.  The core only tracks which
//! line is showing and for how long; rendering is the display layer's job.

/// Ticks each line stays on screen before auto-advancing.
const LINE_TICKS: u32 = 180;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Intro,
    MidGame,
    Finale,
    SoldierIntro,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKey {
    /// In-level story beat shown after completing a level.
    Beat(u32),
    /// Full-screen cutscene between campaign blocks.
    Scene(Scene),
}

/// Line table.  Returns `None` for keys with no script attached.
fn lines_for(key: DialogKey) -> Option<&'static [&'static str]> {
    let lines: &'static [&'static str] = match key {
        // Veteran
        DialogKey::Beat(1) => &[
            "HANDLER: THE EAST SIDE NEEDS CLEANING.",
            "FIND THE PACKAGE IN THE OFFICE.",
        ],
        DialogKey::Beat(2) => &[
            "YOU: THIS PLACE FEELS FAMILIAR...",
            "I NEED ANSWERS.",
        ],
        DialogKey::Beat(3) => &["YOU: THEY KNEW. ALL OF IT WAS AN EXPERIMENT."],
        // Investigator
        DialogKey::Beat(4) => &[
            "DETECTIVE: THIS IS WHERE THE MASSACRE HAPPENED.",
            "I NEED EVIDENCE.",
        ],
        DialogKey::Beat(5) => &[
            "DETECTIVE: THE ORGANIZATION IS STILL ACTIVE.",
            "SOMEONE NEW IS GIVING THE ORDERS.",
        ],
        DialogKey::Beat(6) => &[
            "DETECTIVE: I FOUND SOMETHING...",
            "A NEW MASK. A NEW KILLER.",
        ],
        // Successor
        DialogKey::Beat(7) => &[
            "YOU: THEY ARE WEAK.",
            "VIOLENCE IS THE ONLY LANGUAGE THEY UNDERSTAND.",
        ],
        DialogKey::Beat(8) => &["YOU: THIS IS ART.", "EVERY FALLEN BODY A MASTERPIECE."],
        DialogKey::Beat(9) => &["YOU: I AM THE EVOLUTION..."],
        // Executioner
        DialogKey::Beat(10) => &[
            "EXECUTIONER: ORDER MUST BE RESTORED.",
            "KILL EVERY SURVIVOR.",
        ],
        DialogKey::Beat(11) => &[
            "EXECUTIONER: YOU ARE IMPURITIES.",
            "YOU WILL BE REMOVED.",
        ],
        DialogKey::Beat(12) => &["EXECUTIONER: I AM THE TRUE SUCCESSOR."],
        // Soldier
        DialogKey::Beat(13) => &[
            "SOLDIER: 1989. THE ISLANDS.",
            "THE SQUAD IS HERE TO MOP UP.",
        ],
        DialogKey::Beat(14) => &[
            "SOLDIER: THIS IS THE REAL WORK...",
            "BEFORE THE ORGANIZATION EXISTED.",
        ],
        DialogKey::Beat(15) => &[
            "SOLDIER: WE BUILT THE MONSTER.",
            "NOW WE PUT IT DOWN.",
        ],
        DialogKey::Scene(Scene::Intro) => &[
            "1990: THE LEGACY CARRIES ON...",
            "A NEW GENERATION INHERITED THE CHAOS...",
            "FIVE LOST SOULS, ONE BLOODY FATE...",
        ],
        DialogKey::Scene(Scene::MidGame) => &[
            "THE CYCLE REPEATS...",
            "BUT SOMETHING IS DIFFERENT THIS TIME...",
            "A NEW PLAYER ENTERS THE GAME...",
        ],
        DialogKey::Scene(Scene::Finale) => &[
            "THE TRUTH IS WORSE THAN THE FICTION...",
            "IT WAS NEVER ABOUT PATRIOTISM...",
            "IT WAS ABOUT CONTROL. EXPERIMENTS...",
            "AND THE EXPERIMENT CONTINUES...",
        ],
        DialogKey::Scene(Scene::SoldierIntro) => &[
            "1989 - THE ISLANDS",
            "BEFORE THE ORGANIZATION...",
            "THE SQUAD MOVES IN...",
            "THE ORIGIN OF THE NIGHTMARE",
        ],
        _ => return None,
    };
    Some(lines)
}

/// Playback state for the active script, if any.
#[derive(Clone, Debug, Default)]
pub struct DialogSystem {
    lines: &'static [&'static str],
    index: usize,
    timer: u32,
    cutscene: bool,
}

impl DialogSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playing the script for `key`; `false` if no script exists.
    pub fn start(&mut self, key: DialogKey) -> bool {
        match lines_for(key) {
            Some(lines) => {
                self.lines = lines;
                self.index = 0;
                self.timer = LINE_TICKS;
                self.cutscene = matches!(key, DialogKey::Scene(_));
                true
            }
            None => false,
        }
    }

    /// One tick: lines auto-advance when their display time elapses.
    pub fn update(&mut self) {
        if self.active() && self.timer > 0 {
            self.timer -= 1;
            if self.timer == 0 {
                self.advance_line();
            }
        }
    }

    /// Skip to the next line, ending playback after the last one.
    pub fn advance_line(&mut self) {
        self.index += 1;
        if self.index < self.lines.len() {
            self.timer = LINE_TICKS;
        } else {
            self.lines = &[];
            self.index = 0;
            self.timer = 0;
        }
    }

    pub fn active(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn is_cutscene(&self) -> bool {
        self.cutscene
    }

    pub fn current_line(&self) -> Option<&'static str> {
        self.lines.get(self.index).copied()
    }

    /// Ticks left before the current line auto-advances.
    pub fn time_left(&self) -> u32 {
        self.timer
    }
}
