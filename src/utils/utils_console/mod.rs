#[cfg(not(target_arch = "wasm32"))]
use colored::{Color, Colorize};

/// Prints the given string with the given color.
///
/// ## Example
/// ```
/// use arm_ik::utils::utils_console::{arm_print, PrintMode, PrintColor};
/// arm_print("test", PrintMode::Print, PrintColor::Blue, false);
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn arm_print(s: &str, mode: PrintMode, color: PrintColor, bolded: bool) {
    let mut string = match color.get_color_triple() {
        None => { s.normal() }
        Some((r, g, b)) => { s.color(Color::TrueColor { r, g, b }) }
    };
    if bolded { string = string.bold(); }
    match mode {
        PrintMode::Println => { println!("{}", string); }
        PrintMode::Print => { print!("{}", string); }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn arm_print_new_line() {
    arm_print("\n", PrintMode::Print, PrintColor::None, false);
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);
}

#[cfg(target_arch = "wasm32")]
#[allow(unused)]
pub fn arm_print(s: &str, mode: PrintMode, color: PrintColor, bolded: bool) {
    log(s);
}

#[cfg(target_arch = "wasm32")]
pub fn arm_print_new_line() {
    arm_print("\n", PrintMode::Print, PrintColor::None, false);
}

/// Println will cause a new line after each line, while Print will not.
#[derive(Clone, Debug)]
pub enum PrintMode {
    Println,
    Print
}

/// Defines color for an arm_print command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrintColor {
    None,
    Blue,
    Green,
    Red,
    Yellow,
    Cyan,
    Magenta
}
impl PrintColor {
    pub fn get_color_triple(&self) -> Option<(u8, u8, u8)> {
        match self {
            PrintColor::None => { None }
            PrintColor::Blue => { Some((0, 0, 255)) }
            PrintColor::Green => { Some((0, 255, 0)) }
            PrintColor::Red => { Some((255, 0, 0)) }
            PrintColor::Yellow => { Some((255, 255, 0)) }
            PrintColor::Cyan => { Some((0, 255, 255)) }
            PrintColor::Magenta => { Some((255, 0, 255)) }
        }
    }
}
