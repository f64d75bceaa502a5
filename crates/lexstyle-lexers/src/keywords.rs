//! Default keyword lists, one space-separated string per slot.

/// CSS: properties by level, pseudo-classes, pseudo-elements, vendor-specific lists.
pub const CSS: &[&str] = &[
    // CSS1 properties
    "color background-color background-image background-repeat background-attachment \
     background-position background font-family font-style font-variant font-weight font-size \
     font word-spacing letter-spacing text-decoration vertical-align text-transform text-align \
     text-indent line-height margin-top margin-right margin-bottom margin-left margin \
     padding-top padding-right padding-bottom padding-left padding border-top-width \
     border-right-width border-bottom-width border-left-width border-width border-top \
     border-right border-bottom border-left border border-color border-style width height float \
     clear display white-space list-style-type list-style-image list-style-position list-style",
    // pseudo-classes
    "first-letter first-line link active visited first-child focus hover lang left right first \
     empty enabled disabled checked not root target only-child last-child nth-child \
     nth-last-child first-of-type last-of-type nth-of-type nth-last-of-type only-of-type valid \
     invalid required optional indeterminate default",
    // CSS2 properties
    "border-top-color border-right-color border-bottom-color border-left-color \
     border-top-style border-right-style border-bottom-style border-left-style position top \
     right bottom left z-index direction unicode-bidi min-width max-width min-height max-height \
     overflow clip visibility content quotes counter-reset counter-increment marker-offset size \
     marks page-break-before page-break-after page-break-inside page orphans widows font-stretch \
     font-size-adjust unicode-range units-per-em src panose-1 stemv stemh slope cap-height \
     x-height ascent descent widths bbox definition-src baseline centerline mathline topline \
     text-shadow caption-side table-layout border-collapse border-spacing empty-cells speak-header \
     cursor outline outline-width outline-style outline-color volume speak pause-before \
     pause-after pause cue-before cue-after cue play-during azimuth elevation speech-rate voice-family \
     pitch pitch-range stress richness speak-punctuation speak-numeral",
    // CSS3 properties
    "background-size border-radius border-top-right-radius border-bottom-right-radius \
     border-bottom-left-radius border-top-left-radius box-shadow columns column-width \
     column-count column-rule column-gap column-rule-color column-rule-style column-rule-width \
     resize opacity word-wrap flex flex-basis flex-direction flex-flow flex-grow flex-shrink \
     flex-wrap align-content align-items align-self justify-content order grid grid-area \
     grid-template grid-template-areas grid-template-columns grid-template-rows gap transform \
     transition animation box-sizing text-overflow",
    // pseudo-elements
    "first-letter first-line before after selection",
    // browser-specific properties
    "^-moz- ^-webkit- ^-o- ^-ms- filter zoom",
    // browser-specific pseudo-classes
    "^-moz- ^-webkit- ^-o- ^-ms-",
    // browser-specific pseudo-elements
    "^-moz- ^-webkit- ^-o- ^-ms-",
];

/// C and C++: keywords, secondary keywords, doc-comment keywords, global classes.
pub const CPP: &[&str] = &[
    "alignas alignof and and_eq asm auto bitand bitor bool break case catch char char8_t \
     char16_t char32_t class compl concept const consteval constexpr constinit const_cast \
     continue co_await co_return co_yield decltype default delete do double dynamic_cast else \
     enum explicit export extern false float for friend goto if inline int long mutable \
     namespace new noexcept not not_eq nullptr operator or or_eq private protected public \
     register reinterpret_cast requires return short signed sizeof static static_assert \
     static_cast struct switch template this thread_local throw true try typedef typeid \
     typename union unsigned using virtual void volatile wchar_t while xor xor_eq",
    "size_t ptrdiff_t int8_t int16_t int32_t int64_t uint8_t uint16_t uint32_t uint64_t \
     intptr_t uintptr_t",
    "a addindex addtogroup anchor arg attention author b brief bug c class code date def \
     defgroup deprecated dontinclude e em endcode endhtmlonly endif endlatexonly endlink \
     endverbatim enum example exception f$ f[ f] file fn hideinitializer htmlinclude htmlonly \
     if image include ingroup internal invariant interface latexonly li line link mainpage \
     name namespace nosubgrouping note overload p page par param param[in] param[out] post pre \
     ref relates remarks return retval sa section see showinitializer since skip skipline \
     struct subsection test throw throws todo typedef union until var verbatim verbinclude \
     version warning weakgroup",
    "",
];

/// Python: keywords and highlighted identifiers.
pub const PYTHON: &[&str] = &[
    "and as assert async await break class continue def del elif else except False finally \
     for from global if import in is lambda None nonlocal not or pass raise return True try \
     while with yield",
    "self cls",
];
