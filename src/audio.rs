//! Sound cues and background music
//!
//! The manager maps game events to loaded clips and hands them to an
//! [`AudioBoundary`] device. Missing clips degrade to silence with a warning.

use std::collections::HashMap;

use crate::assets::{AssetProvider, Clip, names};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired
    Shot,
    /// Something exploded
    Boom,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 2] = [SoundEffect::Shot, SoundEffect::Boom];

    fn asset_name(&self) -> &'static str {
        match self {
            SoundEffect::Shot => names::SHOT_SOUND,
            SoundEffect::Boom => names::BOOM,
        }
    }

    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::ShotFired => SoundEffect::Shot,
            GameEvent::Explosion => SoundEffect::Boom,
        }
    }
}

/// Output device for mixed audio
pub trait AudioBoundary {
    fn play(&mut self, clip: &Clip, volume: f32);
    fn start_music(&mut self, clip: &Clip, volume: f32);
    fn fade_out_music(&mut self, fade_ms: u64);
}

/// Device that discards everything (headless runs)
#[derive(Debug, Default)]
pub struct SilentMixer;

impl AudioBoundary for SilentMixer {
    fn play(&mut self, clip: &Clip, volume: f32) {
        log::trace!("mixer: {} at {:.2}", clip.name, volume);
    }

    fn start_music(&mut self, clip: &Clip, volume: f32) {
        log::trace!("mixer: music {} at {:.2}", clip.name, volume);
    }

    fn fade_out_music(&mut self, fade_ms: u64) {
        log::trace!("mixer: music fade {fade_ms} ms");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    Stopped,
    Playing,
    FadingOut { remaining_ms: u64 },
}

/// Audio manager for the game
pub struct AudioManager {
    device: Box<dyn AudioBoundary>,
    effects: HashMap<SoundEffect, Clip>,
    music: Option<Clip>,
    music_state: MusicState,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    played: u64,
}

impl std::fmt::Debug for AudioManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioManager")
            .field("effects", &self.effects.len())
            .field("music_state", &self.music_state)
            .field("muted", &self.muted)
            .finish()
    }
}

impl AudioManager {
    /// Load clips from `provider`; anything missing is silent
    pub fn load(
        provider: &dyn AssetProvider,
        settings: &Settings,
        device: Box<dyn AudioBoundary>,
    ) -> Self {
        let mut effects = HashMap::new();
        for effect in SoundEffect::ALL {
            match provider.load_sound(effect.asset_name()) {
                Ok(clip) => {
                    effects.insert(effect, clip);
                }
                Err(err) => log::warn!("{err}; {:?} will be silent", effect),
            }
        }
        let music = if settings.play_music {
            provider
                .load_sound(names::MUSIC)
                .inspect_err(|err| log::warn!("{err}; playing without music"))
                .ok()
        } else {
            None
        };

        let mut manager = Self {
            device,
            effects,
            music,
            music_state: MusicState::Stopped,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
            played: 0,
        };
        manager.apply_settings(settings);
        manager
    }

    /// Copy volume and mute preferences
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.music_volume = settings.music_volume.clamp(0.0, 1.0);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect; returns whether anything was sent to the device
    pub fn play(&mut self, effect: SoundEffect) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }
        let Some(clip) = self.effects.get(&effect) else {
            return false;
        };
        log::debug!("sound {:?}", effect);
        self.device.play(clip, vol);
        self.played += 1;
        true
    }

    /// Play the cue for every event, in order
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for &event in events {
            self.play(SoundEffect::for_event(event));
        }
    }

    /// Start the background track if one was loaded
    pub fn start_music(&mut self) {
        let Some(clip) = &self.music else {
            return;
        };
        let vol = if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        };
        self.device.start_music(clip, vol);
        self.music_state = MusicState::Playing;
        log::info!("music started: {}", clip.name);
    }

    /// Begin fading the background track out
    pub fn fade_out_music(&mut self, fade_ms: u64) {
        if self.music_state != MusicState::Playing {
            return;
        }
        self.device.fade_out_music(fade_ms);
        self.music_state = MusicState::FadingOut {
            remaining_ms: fade_ms,
        };
    }

    /// Let `elapsed_ms` of wall time pass for the fade
    pub fn advance(&mut self, elapsed_ms: u64) {
        if let MusicState::FadingOut { remaining_ms } = self.music_state {
            self.music_state = match remaining_ms.saturating_sub(elapsed_ms) {
                0 => MusicState::Stopped,
                left => MusicState::FadingOut { remaining_ms: left },
            };
        }
    }

    pub fn music_state(&self) -> MusicState {
        self.music_state
    }

    pub fn has_effect(&self, effect: SoundEffect) -> bool {
        self.effects.contains_key(&effect)
    }

    /// Effects sent to the device so far
    pub fn played(&self) -> u64 {
        self.played
    }
}
