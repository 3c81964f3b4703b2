//! Category assignment for modifier functions.

use indexmap::IndexMap;
use std::fmt;
use swiftmod_core::FunctionSignature;

/// Semantic group of a modifier function. One tagged union is generated per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Layout,
    Appearance,
    Text,
    Interaction,
    Animation,
    Accessibility,
    Environment,
    /// Fallback for names no rule matches.
    Other,
}

impl Category {
    /// Every category, in output order.
    pub const ALL: [Category; 8] = [
        Self::Layout,
        Self::Appearance,
        Self::Text,
        Self::Interaction,
        Self::Animation,
        Self::Accessibility,
        Self::Environment,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Layout => "Layout",
            Self::Appearance => "Appearance",
            Self::Text => "Text",
            Self::Interaction => "Interaction",
            Self::Animation => "Animation",
            Self::Accessibility => "Accessibility",
            Self::Environment => "Environment",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Signatures grouped by category, in [`Category::ALL`] order.
pub type CategoryGroup = IndexMap<Category, Vec<FunctionSignature>>;

/// Assigns categories from naming heuristics.
pub struct FunctionCategorizer {
    /// Exact function names per category, matched case-insensitively.
    name_sets: Vec<(Category, Vec<&'static str>)>,
    /// Name prefixes, checked after the exact sets.
    prefixes: Vec<(Category, &'static str)>,
}

impl FunctionCategorizer {
    pub fn new() -> Self {
        Self {
            name_sets: vec![
                (
                    Category::Layout,
                    vec![
                        "padding", "frame", "offset", "position", "fixedSize",
                        "layoutPriority", "aspectRatio", "scaledToFit", "scaledToFill",
                        "edgesIgnoringSafeArea", "ignoresSafeArea", "safeAreaInset",
                        "safeAreaPadding", "alignmentGuide", "zIndex", "coordinateSpace",
                        "containerRelativeFrame",
                    ],
                ),
                (
                    Category::Appearance,
                    vec![
                        "foregroundColor", "foregroundStyle", "background", "overlay",
                        "border", "cornerRadius", "clipShape", "clipped", "mask", "shadow",
                        "opacity", "blur", "brightness", "contrast", "saturation",
                        "grayscale", "hueRotation", "colorInvert", "colorMultiply", "tint",
                        "accentColor", "blendMode", "compositingGroup", "drawingGroup",
                        "hidden", "scaleEffect", "rotationEffect", "rotation3DEffect",
                        "luminanceToAlpha",
                    ],
                ),
                (
                    Category::Text,
                    vec![
                        "font", "fontWeight", "fontDesign", "fontWidth", "bold", "italic",
                        "underline", "strikethrough", "kerning", "tracking",
                        "baselineOffset", "lineLimit", "lineSpacing",
                        "multilineTextAlignment", "truncationMode", "minimumScaleFactor",
                        "textCase", "allowsTightening", "textSelection", "monospaced",
                        "monospacedDigit", "textContentType", "keyboardType",
                        "autocapitalization", "textInputAutocapitalization",
                        "disableAutocorrection", "autocorrectionDisabled",
                    ],
                ),
                (
                    Category::Interaction,
                    vec![
                        "onTapGesture", "onLongPressGesture", "gesture",
                        "simultaneousGesture", "highPriorityGesture", "onAppear",
                        "onDisappear", "onChange", "onSubmit", "onHover", "disabled",
                        "allowsHitTesting", "contentShape", "focused", "focusable",
                        "onReceive", "task", "refreshable", "swipeActions", "contextMenu",
                        "onDrag", "onDrop", "submitLabel",
                    ],
                ),
                (
                    Category::Animation,
                    vec![
                        "animation", "transition", "matchedGeometryEffect", "transaction",
                        "contentTransition", "phaseAnimator", "keyframeAnimator",
                    ],
                ),
            ],
            prefixes: vec![
                (Category::Accessibility, "accessibility"),
                (Category::Environment, "environment"),
            ],
        }
    }

    /// Category of a single function name. Never fails; unknown names are [`Category::Other`].
    pub fn category_of(&self, name: &str) -> Category {
        for (category, names) in &self.name_sets {
            if names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
                return *category;
            }
        }

        let name_lower = name.to_ascii_lowercase();
        for (category, prefix) in &self.prefixes {
            if name_lower.starts_with(prefix) {
                return *category;
            }
        }

        Category::Other
    }

    /// Partition signatures by category.
    ///
    /// Only non-empty categories appear in the result. Within a category
    /// the input order is preserved.
    pub fn categorize(&self, signatures: &[FunctionSignature]) -> CategoryGroup {
        let mut buckets: IndexMap<Category, Vec<FunctionSignature>> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

        for sig in signatures {
            let category = self.category_of(&sig.name);
            log::trace!("{} -> {}", sig.name, category);
            if let Some(bucket) = buckets.get_mut(&category) {
                bucket.push(sig.clone());
            }
        }

        buckets.retain(|_, sigs| !sigs.is_empty());
        buckets
    }
}

impl Default for FunctionCategorizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sig(name: &str) -> FunctionSignature {
        FunctionSignature::new(name, "some View")
    }

    #[test]
    fn test_category_of_exact_names() {
        let categorizer = FunctionCategorizer::new();
        assert_eq!(categorizer.category_of("padding"), Category::Layout);
        assert_eq!(categorizer.category_of("cornerRadius"), Category::Appearance);
        assert_eq!(categorizer.category_of("font"), Category::Text);
        assert_eq!(categorizer.category_of("onTapGesture"), Category::Interaction);
        assert_eq!(categorizer.category_of("animation"), Category::Animation);
    }

    #[test]
    fn test_category_of_is_case_insensitive() {
        let categorizer = FunctionCategorizer::new();
        assert_eq!(categorizer.category_of("PADDING"), Category::Layout);
        assert_eq!(categorizer.category_of("AccessibilityLabel"), Category::Accessibility);
    }

    #[test]
    fn test_category_of_prefixes() {
        let categorizer = FunctionCategorizer::new();
        assert_eq!(categorizer.category_of("accessibilityHint"), Category::Accessibility);
        assert_eq!(categorizer.category_of("environmentObject"), Category::Environment);
        assert_eq!(categorizer.category_of("environment"), Category::Environment);
    }

    #[test]
    fn test_exact_match_only_for_name_sets() {
        let categorizer = FunctionCategorizer::new();
        // `paddingX` is not `padding`.
        assert_eq!(categorizer.category_of("paddingX"), Category::Other);
        assert_eq!(categorizer.category_of(""), Category::Other);
    }

    #[test]
    fn test_categorize_keeps_input_order() {
        let categorizer = FunctionCategorizer::new();
        let group = categorizer.categorize(&[
            sig("opacity"),
            sig("padding"),
            sig("customThing"),
            sig("frame"),
        ]);

        let keys: Vec<_> = group.keys().copied().collect();
        assert_eq!(keys, vec![Category::Layout, Category::Appearance, Category::Other]);

        let layout: Vec<_> = group[&Category::Layout].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(layout, vec!["padding", "frame"]);
    }

    #[test]
    fn test_categorize_empty() {
        assert!(FunctionCategorizer::new().categorize(&[]).is_empty());
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Category::Layout.to_string(), "Layout");
        assert_eq!(Category::Other.to_string(), "Other");
    }

    proptest! {
        #[test]
        fn prop_categorize_is_a_partition(names in prop::collection::vec("[a-zA-Z_]{0,16}", 0..24)) {
            let categorizer = FunctionCategorizer::new();
            let sigs: Vec<_> = names.iter().map(|n| sig(n)).collect();
            let group = categorizer.categorize(&sigs);

            let total: usize = group.values().map(Vec::len).sum();
            prop_assert_eq!(total, sigs.len());

            for (category, members) in &group {
                prop_assert!(!members.is_empty());
                for member in members {
                    prop_assert_eq!(categorizer.category_of(&member.name), *category);
                }
            }

            let keys: Vec<_> = group.keys().copied().collect();
            let mut sorted = keys.clone();
            sorted.sort();
            prop_assert_eq!(keys, sorted);
        }
    }
}
