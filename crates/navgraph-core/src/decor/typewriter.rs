pub const CHAR_SECS: f32 = 0.04;
pub const BLINK_SECS: f32 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct Typewriter {
    text: String,
    started_at: f32,
}

impl Typewriter {
    pub fn new(text: impl Into<String>, started_at: f32) -> Self {
        Self {
            text: text.into(),
            started_at,
        }
    }

    /// Prefix revealed at time `t`, cut on a char boundary.
    pub fn visible(&self, t: f32) -> &str {
        let shown = ((t - self.started_at).max(0.0) / CHAR_SECS).floor() as usize;
        match self.text.char_indices().nth(shown) {
            Some((byte, _)) => &self.text[..byte],
            None => &self.text,
        }
    }

    pub fn is_done(&self, t: f32) -> bool {
        self.visible(t).len() == self.text.len()
    }

    pub fn cursor_on(&self, t: f32) -> bool {
        (t.max(0.0) % BLINK_SECS) < BLINK_SECS * 0.5
    }
}
