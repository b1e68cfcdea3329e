//! Print theme tokens as CSS

use crate::theme::ColorMode;

/// Print the `:root` rule for `mode`
pub fn run(mode: ColorMode) {
    println!("{}", mode.tokens().css_rule());
}
