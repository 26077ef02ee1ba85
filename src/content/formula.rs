//! Plain-text typesetting for the TeX subset used by the chapters.
//!
//! Output is a single line of Unicode. Commands without a glyph are echoed
//! unchanged so a typo stays visible on the page.

use std::iter::Peekable;
use std::str::Chars;

fn symbol(name: &str) -> Option<&'static str> {
    Some(match name {
        "alpha" => "α",
        "beta" => "β",
        "gamma" => "γ",
        "delta" => "δ",
        "epsilon" | "varepsilon" => "ε",
        "zeta" => "ζ",
        "eta" => "η",
        "theta" => "θ",
        "iota" => "ι",
        "kappa" => "κ",
        "lambda" => "λ",
        "mu" => "μ",
        "nu" => "ν",
        "xi" => "ξ",
        "pi" => "π",
        "rho" => "ρ",
        "sigma" => "σ",
        "tau" => "τ",
        "phi" | "varphi" => "φ",
        "chi" => "χ",
        "psi" => "ψ",
        "omega" => "ω",
        "Gamma" => "Γ",
        "Delta" => "Δ",
        "Theta" => "Θ",
        "Lambda" => "Λ",
        "Xi" => "Ξ",
        "Pi" => "Π",
        "Sigma" => "Σ",
        "Phi" => "Φ",
        "Psi" => "Ψ",
        "Omega" => "Ω",
        "cdot" => "·",
        "times" => "×",
        "pm" => "±",
        "circ" => "∘",
        "subset" => "⊂",
        "subseteq" => "⊆",
        "in" => "∈",
        "to" | "rightarrow" => "→",
        "mapsto" => "↦",
        "infty" => "∞",
        "partial" => "∂",
        "nabla" => "∇",
        "perp" => "⊥",
        "oplus" => "⊕",
        "otimes" => "⊗",
        "langle" => "⟨",
        "rangle" => "⟩",
        "leq" | "le" => "≤",
        "geq" | "ge" => "≥",
        "neq" | "ne" => "≠",
        "approx" => "≈",
        "equiv" => "≡",
        "forall" => "∀",
        "exists" => "∃",
        "sum" => "∑",
        "int" => "∫",
        "sqrt" => "√",
        "dots" | "ldots" | "cdots" => "…",
        "|" => "‖",
        "{" => "{",
        "}" => "}",
        "," | ";" | ":" | " " => " ",
        "quad" => "  ",
        "!" | "left" | "right" => "",
        "sin" => "sin",
        "cos" => "cos",
        "tan" => "tan",
        "cot" => "cot",
        "exp" => "exp",
        "log" => "log",
        "det" => "det",
        "dim" => "dim",
        "ker" => "ker",
        "max" => "max",
        "min" => "min",
        _ => return None,
    })
}

fn blackboard(c: char) -> char {
    match c {
        'C' => 'ℂ',
        'H' => 'ℍ',
        'N' => 'ℕ',
        'P' => 'ℙ',
        'Q' => 'ℚ',
        'R' => 'ℝ',
        'Z' => 'ℤ',
        other => other,
    }
}

fn superscript(c: char) -> Option<char> {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
    if let Some(d) = c.to_digit(10) {
        return Some(DIGITS[d as usize]);
    }
    Some(match c {
        '+' => '⁺',
        '-' => '⁻',
        '=' => '⁼',
        '(' => '⁽',
        ')' => '⁾',
        'a' => 'ᵃ',
        'b' => 'ᵇ',
        'c' => 'ᶜ',
        'd' => 'ᵈ',
        'e' => 'ᵉ',
        'f' => 'ᶠ',
        'g' => 'ᵍ',
        'h' => 'ʰ',
        'i' => 'ⁱ',
        'j' => 'ʲ',
        'k' => 'ᵏ',
        'l' => 'ˡ',
        'm' => 'ᵐ',
        'n' => 'ⁿ',
        'o' => 'ᵒ',
        'p' => 'ᵖ',
        'r' => 'ʳ',
        's' => 'ˢ',
        't' => 'ᵗ',
        'u' => 'ᵘ',
        'v' => 'ᵛ',
        'w' => 'ʷ',
        'x' => 'ˣ',
        'y' => 'ʸ',
        'z' => 'ᶻ',
        _ => return None,
    })
}

fn subscript(c: char) -> Option<char> {
    const DIGITS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];
    if let Some(d) = c.to_digit(10) {
        return Some(DIGITS[d as usize]);
    }
    Some(match c {
        '+' => '₊',
        '-' => '₋',
        '=' => '₌',
        '(' => '₍',
        ')' => '₎',
        'a' => 'ₐ',
        'e' => 'ₑ',
        'h' => 'ₕ',
        'i' => 'ᵢ',
        'j' => 'ⱼ',
        'k' => 'ₖ',
        'l' => 'ₗ',
        'm' => 'ₘ',
        'n' => 'ₙ',
        'o' => 'ₒ',
        'p' => 'ₚ',
        'r' => 'ᵣ',
        's' => 'ₛ',
        't' => 'ₜ',
        'u' => 'ᵤ',
        'v' => 'ᵥ',
        'x' => 'ₓ',
        _ => return None,
    })
}

/// Converts a TeX formula into Unicode text.
pub fn typeset(tex: &str) -> String {
    let mut out = String::with_capacity(tex.len());
    let mut chars = tex.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let name = command_name(&mut chars);
                if name == "mathbb" {
                    out.extend(argument(&mut chars).chars().map(blackboard));
                } else if let Some(glyph) = symbol(&name) {
                    out.push_str(glyph);
                } else {
                    out.push('\\');
                    out.push_str(&name);
                }
            }
            '^' => push_script(&mut out, &argument(&mut chars), '^', superscript),
            '_' => push_script(&mut out, &argument(&mut chars), '_', subscript),
            '{' | '}' => {}
            other => out.push(other),
        }
    }

    out
}

fn command_name(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if !c.is_ascii_alphabetic() {
            break;
        }
        name.push(c);
        chars.next();
    }
    if name.is_empty() {
        if let Some(c) = chars.next() {
            name.push(c);
        }
    }
    name
}

/// Reads a braced group or a single token and typesets it.
fn argument(chars: &mut Peekable<Chars<'_>>) -> String {
    match chars.next() {
        Some('{') => {
            let mut depth = 1;
            let mut raw = String::new();
            for c in chars.by_ref() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                raw.push(c);
            }
            typeset(&raw)
        }
        Some('\\') => typeset(&format!("\\{}", command_name(chars))),
        Some(c) => c.to_string(),
        None => String::new(),
    }
}

fn push_script(out: &mut String, arg: &str, marker: char, map: fn(char) -> Option<char>) {
    match arg.chars().map(map).collect::<Option<String>>() {
        Some(mapped) => out.push_str(&mapped),
        None if arg.chars().count() == 1 => {
            out.push(marker);
            out.push_str(arg);
        }
        None => {
            out.push(marker);
            out.push('(');
            out.push_str(arg);
            out.push(')');
        }
    }
}
