//! Weapon data and attack-eligibility rules.
//!
//! A weapon is stateless apart from its remaining cooldown and ammo.
//! Every qualifying hit removes one health point from the target, so
//! `damage` is 1 across the board — weapons differ in reach, fire rate
//! and ammunition, not in per-hit lethality.

/// Damage used for the enemies' melee strike against the player.  The
/// mercy roll can downgrade it to a single health point; otherwise it is
/// an instant take-down.
pub const LETHAL: i32 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    Fists,
    Knife,
    Club,
    Blade,
    Pistol,
    Shotgun,
    RapidFire,
    LongRifle,
    BattleRifle,
}

impl WeaponKind {
    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Fists => "FISTS",
            WeaponKind::Knife => "KNIFE",
            WeaponKind::Club => "CLUB",
            WeaponKind::Blade => "BLADE",
            WeaponKind::Pistol => "PISTOL",
            WeaponKind::Shotgun => "SHOTGUN",
            WeaponKind::RapidFire => "RAPID-FIRE",
            WeaponKind::LongRifle => "LONG RIFLE",
            WeaponKind::BattleRifle => "BATTLE RIFLE",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub damage: i32,
    /// Melee: sweep reach.  Ranged: maximum projectile travel.
    pub range: f32,
    /// Ticks remaining until the weapon may attack again.
    pub cooldown: u32,
    /// Value `cooldown` is reset to after a successful attack.
    pub cooldown_ticks: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub is_ranged: bool,
}

impl Weapon {
    /// Fresh weapon of the given kind: full ammo, no cooldown pending.
    pub fn new(kind: WeaponKind) -> Self {
        // (range, cooldown, max_ammo); max_ammo == 0 marks a melee weapon
        let (range, cooldown_ticks, max_ammo) = match kind {
            WeaponKind::Fists => (35.0, 15, 0),
            WeaponKind::Knife => (40.0, 10, 0),
            WeaponKind::Club => (50.0, 25, 0),
            WeaponKind::Blade => (60.0, 15, 0),
            WeaponKind::Pistol => (300.0, 30, 12),
            WeaponKind::Shotgun => (150.0, 60, 6),
            WeaponKind::RapidFire => (200.0, 5, 30),
            WeaponKind::LongRifle => (500.0, 90, 5),
            WeaponKind::BattleRifle => (400.0, 25, 20),
        };
        Weapon {
            kind,
            damage: 1,
            range,
            cooldown: 0,
            cooldown_ticks,
            ammo: max_ammo,
            max_ammo,
            is_ranged: max_ammo > 0,
        }
    }

    /// True iff the cooldown has elapsed and, for ranged weapons, a round
    /// is chambered.
    pub fn can_attack(&self) -> bool {
        self.cooldown == 0 && (!self.is_ranged || self.ammo > 0)
    }

    /// Consume one attack: reset the cooldown and spend a round.
    /// No-op returning `false` when the weapon is not eligible.
    pub fn attack(&mut self) -> bool {
        if !self.can_attack() {
            return false;
        }
        self.cooldown = self.cooldown_ticks;
        if self.is_ranged {
            self.ammo -= 1;
        }
        true
    }

    /// Refill ammo.  No-op returning `false` for melee weapons.
    pub fn reload(&mut self) -> bool {
        if !self.is_ranged {
            return false;
        }
        self.ammo = self.max_ammo;
        true
    }

    /// One simulation tick: cooldown decrements monotonically, floor at 0.
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}
