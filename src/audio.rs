//! Host audio using the Web Audio API
//!
//! One master gain node; the SDK's volume events drive it. The only sound
//! of our own is a short procedural click on install taps.

use web_sys::{AudioContext, GainNode, OscillatorType};

use crate::sdk::AudioSink;

/// Web Audio output owned by the page
pub struct WebAudioSink {
    ctx: Option<AudioContext>,
    master: Option<GainNode>,
}

impl Default for WebAudioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl WebAudioSink {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        let master = ctx.as_ref().and_then(|ctx| {
            let gain = ctx.create_gain().ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;
            Some(gain)
        });
        if master.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx, master }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Tap feedback - short soft click through the master gain
    pub fn play_tap(&self) {
        let (Some(ctx), Some(master)) = (&self.ctx, &self.master) else {
            return;
        };
        let Ok(osc) = ctx.create_oscillator() else { return };
        let Ok(gain) = ctx.create_gain() else { return };

        osc.set_type(OscillatorType::Sine);
        if osc.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(master).is_err()
        {
            return;
        }

        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(660.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(880.0, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }
}

impl AudioSink for WebAudioSink {
    fn set_volume(&self, level: f32) {
        if let Some(master) = &self.master {
            master.gain().set_value(level);
        }
    }
}
