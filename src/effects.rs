use std::fmt;
use std::str::FromStr;

use crate::CardError;

/// Cosmetic effects that can be embedded into an exported card. Each
/// effect contributes a CSS block and, for the particle effects, a JS
/// snippet that spawns the animated elements on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    Glow,
    Snow,
    Stars,
    Rainbow,
    Matrix,
    Fireflies,
    Confetti,
    Neon,
    Vaporware,
}

impl EffectKind {
    pub fn all() -> &'static [EffectKind] {
        &[
            EffectKind::Glow,
            EffectKind::Snow,
            EffectKind::Stars,
            EffectKind::Rainbow,
            EffectKind::Matrix,
            EffectKind::Fireflies,
            EffectKind::Confetti,
            EffectKind::Neon,
            EffectKind::Vaporware,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Glow => "glow",
            EffectKind::Snow => "snow",
            EffectKind::Stars => "stars",
            EffectKind::Rainbow => "rainbow",
            EffectKind::Matrix => "matrix",
            EffectKind::Fireflies => "fireflies",
            EffectKind::Confetti => "confetti",
            EffectKind::Neon => "neon",
            EffectKind::Vaporware => "vaporware",
        }
    }

    /// CSS block substituted into the export template.
    pub fn css(&self) -> &'static str {
        match self {
            EffectKind::Glow => {
                r#".profile-records, .profile-record, .profile-header-image, .footer {
    box-shadow: 0 0 5px var(--border-color), 0 0 10px var(--border-color);
}"#
            }
            EffectKind::Neon => {
                r#"@keyframes neonPulse {
    0%, 100% { opacity: 1; text-shadow: 0 0 5px var(--border-color), 0 0 10px var(--border-color); }
    50% { opacity: 0.8; text-shadow: 0 0 10px var(--border-color), 0 0 20px var(--border-color); }
}
.profile-records, .profile-record, .profile-header-image, .footer {
    text-shadow: 0 0 5px var(--border-color), 0 0 10px var(--border-color);
    box-shadow: 0 0 5px var(--border-color), 0 0 10px var(--border-color);
    animation: neonPulse 1.5s ease-in-out infinite;
}"#
            }
            EffectKind::Snow => {
                r#"@keyframes snowFall {
    0% { transform: translateY(-100px) rotate(0deg); }
    100% { transform: translateY(100vh) rotate(360deg); }
}
.snow-container {
    position: fixed; top: 0; left: 0; right: 0; bottom: 0;
    pointer-events: none; z-index: 50; overflow: hidden;
}
.snowflake {
    position: absolute; background: var(--primary-color);
    border-radius: 50%; animation: snowFall linear infinite;
}"#
            }
            EffectKind::Stars => {
                r#"@keyframes starTwinkle {
    0%, 100% { opacity: 0.2; }
    50% { opacity: 1; }
}
.stars-container {
    position: fixed; top: 0; left: 0; right: 0; bottom: 0;
    pointer-events: none; z-index: 50; overflow: hidden;
}
.star {
    position: absolute; background: #ffffff;
    border-radius: 50%; animation: starTwinkle ease-in-out infinite;
}"#
            }
            EffectKind::Rainbow => {
                r#"@keyframes rainbowBorder {
    0% { border-color: #ff0000; }
    16.666% { border-color: #ff8000; }
    33.333% { border-color: #ffff00; }
    50% { border-color: #00ff00; }
    66.666% { border-color: #0000ff; }
    83.333% { border-color: #8000ff; }
    100% { border-color: #ff0000; }
}
.profile-record, .profile-records {
    animation: rainbowBorder 3s linear infinite;
}"#
            }
            EffectKind::Matrix => {
                r#"@keyframes matrixFall {
    0% { transform: translateY(-100%); opacity: 0; }
    10% { opacity: 1; }
    70% { opacity: 1; }
    100% { transform: translateY(100vh); opacity: 0; }
}
.matrix-effect {
    position: fixed; top: 0; left: 0; right: 0; bottom: 0;
    pointer-events: none; z-index: 40; overflow: hidden; opacity: 0.5;
}
.matrix-column {
    position: absolute; top: -100px; color: #22FF22;
    font-family: monospace; font-size: 16px; line-height: 16px;
    white-space: nowrap;
    text-shadow: 0 0 8px #22FF22, 0 0 15px #22FF22;
    animation: matrixFall linear infinite;
}"#
            }
            EffectKind::Fireflies => {
                r#"@keyframes fireflyFloat {
    0%, 100% { transform: translate(0, 0); }
    25% { transform: translate(var(--x1), var(--y1)); }
    50% { transform: translate(var(--x2), var(--y2)); }
    75% { transform: translate(var(--x3), var(--y3)); }
}
.fireflies-container {
    position: fixed; top: 0; left: 0; right: 0; bottom: 0;
    pointer-events: none; z-index: 40; overflow: hidden;
}
.firefly {
    position: absolute; background: #ffff00; border-radius: 50%;
    box-shadow: 0 0 var(--size) #ffff00;
    animation: fireflyFloat ease-in-out infinite;
}"#
            }
            EffectKind::Confetti => {
                r#"@keyframes confettiFall {
    0% { transform: translateY(-100vh) rotate(0deg); }
    100% { transform: translateY(100vh) rotate(360deg); }
}
.confetti-container {
    position: fixed; top: 0; left: 0; right: 0; bottom: 0;
    pointer-events: none; z-index: 40; overflow: hidden;
}
.confetti {
    position: absolute; animation: confettiFall linear infinite;
}"#
            }
            EffectKind::Vaporware => {
                r#"body {
    background: linear-gradient(45deg, #ff00ff, #00ffff);
    background-size: 100% 100%;
}"#
            }
        }
    }

    /// JS that spawns the particle elements in the exported page.
    /// CSS-only effects return `None`.
    pub fn init_js(&self) -> Option<&'static str> {
        match self {
            EffectKind::Snow => Some(
                r#"(function () {
    var container = document.createElement('div');
    container.className = 'snow-container';
    document.body.appendChild(container);
    for (var i = 0; i < 50; i++) {
        var flake = document.createElement('div');
        flake.className = 'snowflake';
        var size = Math.random() * 4 + 2;
        flake.style.width = size + 'px';
        flake.style.height = size + 'px';
        flake.style.left = Math.random() * 100 + '%';
        flake.style.animationDuration = (Math.random() * 5 + 5) + 's';
        flake.style.animationDelay = Math.random() * 5 + 's';
        container.appendChild(flake);
    }
})();"#,
            ),
            EffectKind::Stars => Some(
                r#"(function () {
    var container = document.createElement('div');
    container.className = 'stars-container';
    document.body.appendChild(container);
    for (var i = 0; i < 80; i++) {
        var star = document.createElement('div');
        star.className = 'star';
        var size = Math.random() * 3 + 1;
        star.style.width = size + 'px';
        star.style.height = size + 'px';
        star.style.left = Math.random() * 100 + '%';
        star.style.top = Math.random() * 100 + '%';
        star.style.animationDuration = (Math.random() * 3 + 1) + 's';
        container.appendChild(star);
    }
})();"#,
            ),
            EffectKind::Matrix => Some(
                r#"(function () {
    var container = document.createElement('div');
    container.className = 'matrix-effect';
    document.body.appendChild(container);
    var chars = 'アイウエオカキクケコ0123456789';
    for (var i = 0; i < 30; i++) {
        var column = document.createElement('div');
        column.className = 'matrix-column';
        var text = '';
        for (var j = 0; j < 20; j++) {
            text += chars.charAt(Math.floor(Math.random() * chars.length)) + '<br>';
        }
        column.innerHTML = text;
        column.style.left = (i / 30) * 100 + '%';
        column.style.animationDuration = (Math.random() * 6 + 4) + 's';
        column.style.animationDelay = Math.random() * 4 + 's';
        container.appendChild(column);
    }
})();"#,
            ),
            EffectKind::Fireflies => Some(
                r#"(function () {
    var container = document.createElement('div');
    container.className = 'fireflies-container';
    document.body.appendChild(container);
    for (var i = 0; i < 20; i++) {
        var fly = document.createElement('div');
        fly.className = 'firefly';
        var size = Math.random() * 4 + 2;
        fly.style.width = size + 'px';
        fly.style.height = size + 'px';
        fly.style.setProperty('--size', size * 2 + 'px');
        fly.style.left = Math.random() * 100 + '%';
        fly.style.top = Math.random() * 100 + '%';
        for (var k = 1; k <= 3; k++) {
            fly.style.setProperty('--x' + k, (Math.random() * 200 - 100) + 'px');
            fly.style.setProperty('--y' + k, (Math.random() * 200 - 100) + 'px');
        }
        fly.style.animationDuration = (Math.random() * 6 + 6) + 's';
        container.appendChild(fly);
    }
})();"#,
            ),
            EffectKind::Confetti => Some(
                r#"(function () {
    var container = document.createElement('div');
    container.className = 'confetti-container';
    document.body.appendChild(container);
    var colors = ['#ff0000', '#ff8000', '#ffff00', '#00ff00', '#0000ff', '#8000ff'];
    for (var i = 0; i < 60; i++) {
        var piece = document.createElement('div');
        piece.className = 'confetti';
        piece.style.width = '8px';
        piece.style.height = '12px';
        piece.style.background = colors[i % colors.length];
        piece.style.left = Math.random() * 100 + '%';
        piece.style.animationDuration = (Math.random() * 4 + 3) + 's';
        piece.style.animationDelay = Math.random() * 4 + 's';
        container.appendChild(piece);
    }
})();"#,
            ),
            EffectKind::Glow
            | EffectKind::Rainbow
            | EffectKind::Neon
            | EffectKind::Vaporware => None,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EffectKind {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EffectKind::all()
            .iter()
            .find(|kind| kind.as_str() == s.to_lowercase())
            .copied()
            .ok_or_else(|| {
                CardError::Validation(format!("Unknown effect: {s}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_names() {
        for kind in EffectKind::all() {
            assert_eq!(
                kind.as_str().parse::<EffectKind>().unwrap(),
                *kind
            );
        }
        assert!("sparkles".parse::<EffectKind>().is_err());
    }

    #[test]
    fn particle_effects_carry_init_js() {
        assert!(EffectKind::Snow.init_js().is_some());
        assert!(EffectKind::Matrix.init_js().is_some());
        assert!(EffectKind::Glow.init_js().is_none());
        assert!(EffectKind::Snow.css().contains(".snowflake"));
    }
}
