//! Abbreviations available without any user database.

use crate::symbols::SymbolTable;

pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[
    // Greek, lower case
    ("a", "α"),
    ("alpha", "α"),
    ("b", "β"),
    ("beta", "β"),
    ("g", "γ"),
    ("gamma", "γ"),
    ("d", "δ"),
    ("delta", "δ"),
    ("e", "ε"),
    ("epsilon", "ε"),
    ("z", "ζ"),
    ("zeta", "ζ"),
    ("eta", "η"),
    ("th", "θ"),
    ("theta", "θ"),
    ("i", "ι"),
    ("iota", "ι"),
    ("k", "κ"),
    ("kappa", "κ"),
    ("l", "λ"),
    ("lam", "λ"),
    ("lambda", "λ"),
    ("mu", "μ"),
    ("nu", "ν"),
    ("xi", "ξ"),
    ("pi", "π"),
    ("rho", "ρ"),
    ("s", "σ"),
    ("sigma", "σ"),
    ("tau", "τ"),
    ("phi", "φ"),
    ("chi", "χ"),
    ("psi", "ψ"),
    ("o", "ω"),
    ("omega", "ω"),
    // Greek, upper case
    ("G", "Γ"),
    ("Gamma", "Γ"),
    ("D", "Δ"),
    ("Delta", "Δ"),
    ("Th", "Θ"),
    ("Theta", "Θ"),
    ("L", "Λ"),
    ("Lambda", "Λ"),
    ("S", "Σ"),
    ("Sigma", "Σ"),
    ("Pi", "Π"),
    ("Phi", "Φ"),
    ("Psi", "Ψ"),
    ("O", "Ω"),
    ("Omega", "Ω"),
    // Arrows
    ("to", "→"),
    ("r", "→"),
    ("->", "→"),
    ("rightarrow", "→"),
    ("l<-", "←"),
    ("<-", "←"),
    ("leftarrow", "←"),
    ("gets", "←"),
    ("<->", "↔"),
    ("iff", "↔"),
    ("lr", "↔"),
    ("=>", "⇒"),
    ("Rightarrow", "⇒"),
    ("<=>", "⇔"),
    ("Leftrightarrow", "⇔"),
    ("mapsto", "↦"),
    ("u", "↑"),
    ("uparrow", "↑"),
    ("downarrow", "↓"),
    ("hookrightarrow", "↪"),
    ("rightsquigarrow", "⇝"),
    // Logic
    ("and", "∧"),
    ("wedge", "∧"),
    ("or", "∨"),
    ("vee", "∨"),
    ("not", "¬"),
    ("neg", "¬"),
    ("forall", "∀"),
    ("all", "∀"),
    ("exists", "∃"),
    ("ex", "∃"),
    ("top", "⊤"),
    ("bot", "⊥"),
    ("|-", "⊢"),
    ("vdash", "⊢"),
    ("models", "⊨"),
    // Sets
    ("in", "∈"),
    ("notin", "∉"),
    ("ni", "∋"),
    ("sub", "⊂"),
    ("subset", "⊂"),
    ("sube", "⊆"),
    ("subseteq", "⊆"),
    ("sup", "⊃"),
    ("supseteq", "⊇"),
    ("cap", "∩"),
    ("inter", "∩"),
    ("cup", "∪"),
    ("union", "∪"),
    ("empty", "∅"),
    ("emptyset", "∅"),
    ("setminus", "∖"),
    ("powerset", "𝒫"),
    ("bigcup", "⋃"),
    ("bigcap", "⋂"),
    // Relations and operators
    ("ne", "≠"),
    ("neq", "≠"),
    ("le", "≤"),
    ("leq", "≤"),
    ("ge", "≥"),
    ("geq", "≥"),
    ("==", "≡"),
    ("equiv", "≡"),
    ("~", "∼"),
    ("~~", "≈"),
    ("approx", "≈"),
    ("cong", "≅"),
    ("x", "×"),
    ("times", "×"),
    ("cdot", "⬝"),
    ("circ", "∘"),
    ("comp", "∘"),
    ("oplus", "⊕"),
    ("otimes", "⊗"),
    ("sum", "∑"),
    ("prod", "∏"),
    ("infty", "∞"),
    ("inf", "⊓"),
    ("glb", "⊓"),
    ("sup_", "⊔"),
    ("lub", "⊔"),
    ("sqrt", "√"),
    ("partial", "∂"),
    ("nabla", "∇"),
    ("pm", "±"),
    ("div", "÷"),
    // Blackboard letters
    ("N", "ℕ"),
    ("nat", "ℕ"),
    ("Z", "ℤ"),
    ("int", "ℤ"),
    ("Q", "ℚ"),
    ("rat", "ℚ"),
    ("R", "ℝ"),
    ("real", "ℝ"),
    ("C", "ℂ"),
    ("complex", "ℂ"),
    // Brackets
    ("<", "⟨"),
    (">", "⟩"),
    ("langle", "⟨"),
    ("rangle", "⟩"),
    ("f<", "‹"),
    ("f>", "›"),
    ("f<<", "«"),
    ("f>>", "»"),
    ("[[", "⟦"),
    ("]]", "⟧"),
    ("{{", "⦃"),
    ("}}", "⦄"),
    ("lceil", "⌈"),
    ("rceil", "⌉"),
    ("lfloor", "⌊"),
    ("rfloor", "⌋"),
    // Sub- and superscripts
    ("0", "₀"),
    ("1", "₁"),
    ("2", "₂"),
    ("3", "₃"),
    ("4", "₄"),
    ("5", "₅"),
    ("6", "₆"),
    ("7", "₇"),
    ("8", "₈"),
    ("9", "₉"),
    ("_0", "₀"),
    ("_1", "₁"),
    ("_2", "₂"),
    ("_3", "₃"),
    ("_i", "ᵢ"),
    ("_n", "ₙ"),
    ("^0", "⁰"),
    ("^1", "¹"),
    ("^2", "²"),
    ("^3", "³"),
    ("^n", "ⁿ"),
    ("^-1", "⁻¹"),
    ("inv", "⁻¹"),
    // Misc
    ("qed", "∎"),
    ("tr", "⬝"),
    ("t", "▸"),
    ("deg", "°"),
    ("star", "⋆"),
    ("dag", "†"),
];

/// The built-in abbreviations as a symbol table.
pub fn default_table() -> SymbolTable {
    SymbolTable::new(DEFAULT_ABBREVIATIONS.iter().copied())
}
