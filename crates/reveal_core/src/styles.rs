use crate::effect::class;
use crate::RevealConfig;

/// Marker attribute carried by the injected `<style>` element.
pub const STYLE_MARKER_ATTR: &str = "data-reveal-styles";
pub const STYLE_MARKER_VERSION: &str = "v1";

/// Builds the single stylesheet backing every class the runtime toggles.
pub fn stylesheet(config: &RevealConfig) -> String {
    let duration = config.duration_ms;
    let easing = config.easing;
    let period = config.ticker_period_s;
    let animate = class::ANIMATE;
    let animate_scale = class::ANIMATE_SCALE;
    let visible = class::VISIBLE;
    let ticker = class::TICKER;
    let date_hidden = class::DATE_HIDDEN;
    let icon = class::ICON_WRAPPER;

    format!(
        r#"
.{animate} {{
  opacity: 0;
  transform: translateY(24px);
  transition: opacity {duration}ms {easing},
              transform {duration}ms {easing};
}}
.{animate}.{visible} {{
  opacity: 1;
  transform: translateY(0);
}}
.{animate_scale} {{
  opacity: 0;
  transform: scale(0.95);
  transition: opacity {duration}ms {easing},
              transform {duration}ms {easing};
}}
.{animate_scale}.{visible} {{
  opacity: 1;
  transform: scale(1);
}}
.{ticker} {{
  animation: ticker-scroll {period}s linear infinite;
}}
@keyframes ticker-scroll {{
  0% {{ transform: translateY(0); }}
  100% {{ transform: translateY(-50%); }}
}}
.{ticker}:hover {{
  animation-play-state: paused;
}}
.{date_hidden} {{
  display: none !important;
}}
.{icon} {{
  position: relative;
  display: inline-block;
  border-radius: 24px;
  overflow: hidden;
}}
.{icon}::after {{
  content: '';
  position: absolute;
  inset: 0;
  border-radius: 24px;
  box-shadow: inset 0 0 40px 20px rgba(249, 250, 251, 0.9);
  pointer-events: none;
}}
.dark .{icon}::after {{
  box-shadow: inset 0 0 40px 20px rgba(9, 9, 11, 0.9);
}}
"#
    )
}
