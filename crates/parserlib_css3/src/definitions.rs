//! Value grammars of CSS properties, at-rule descriptors, named types and functions
//!
//! The grammars use the CSS value definition syntax. Besides the usual `<type>` references the
//! following shorthands exist:
//! - `<len>`, `<pct>`, `<num>`, `<int>` and friends with an optional range suffix (`<len0+>`,
//!   `<num0-1>`, ...) for the numeric types;
//! - `<fn:group>` for any function of one of the function groups at the bottom of this file.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// How the value of a property is checked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Definition {
    Grammar(&'static str),
    /// Anything goes
    Any,
}

/// Descriptors of an at-rule such as `@font-face`
pub struct Scope {
    pub name: &'static str,
    /// Regular properties are allowed too (`@page`)
    pub all_properties: bool,
    pub descriptors: &'static [(&'static str, Definition)],
}

/// Functions that can be referenced as a group with `<fn:name>`
pub struct FunctionGroup {
    pub name: &'static str,
    pub functions: &'static [(&'static str, &'static str)],
}

const PROPERTIES: &[(&str, Definition)] = &[
    ("accent-color", Definition::Grammar("auto | <color>")),
    ("align-items", Definition::Grammar("normal | stretch | <baseline-position> | [ <overflow-position>? <self-position> ]")),
    ("align-content", Definition::Grammar("normal | <baseline-position> | <content-distribution> | <overflow-position>? <content-position>")),
    ("align-self", Definition::Grammar("auto | normal | stretch | <baseline-position> | <overflow-position>? <self-position>")),
    ("all", Definition::Grammar("initial | inherit | revert | unset")),
    ("alignment-baseline", Definition::Grammar("auto | baseline | use-script | before-edge | text-before-edge | after-edge | text-after-edge | central | middle | ideographic | alphabetic | hanging | mathematical")),
    ("animation", Definition::Grammar("[ <time0+> || <timing-function> || <time> || [ infinite | <num0+> ] || <animation-direction> || <animation-fill-mode> || [ running | paused ] || [ none | <custom-ident> | <string> ] || <animation-timeline> ]#")),
    ("animation-composition", Definition::Grammar("[ replace | add | accumulate ]#")),
    ("animation-delay", Definition::Grammar("<time>#")),
    ("animation-direction", Definition::Grammar("<animation-direction>#")),
    ("animation-duration", Definition::Grammar("[ auto | <time0+> ]#")),
    ("animation-fill-mode", Definition::Grammar("<animation-fill-mode>#")),
    ("animation-iteration-count", Definition::Grammar("[ <num> | infinite ]#")),
    ("animation-name", Definition::Grammar("[ none | <keyframes-name> ]#")),
    ("animation-play-state", Definition::Grammar("[ running | paused ]#")),
    ("animation-timeline", Definition::Grammar("<animation-timeline>#")),
    ("animation-timing-function", Definition::Grammar("<timing-function>#")),
    ("appearance", Definition::Grammar("none | auto")),
    ("-moz-appearance", Definition::Grammar("none | button | button-arrow-down | button-arrow-next | button-arrow-previous | button-arrow-up | button-bevel | button-focus | caret | checkbox | checkbox-container | checkbox-label | checkmenuitem | dualbutton | groupbox | listbox | listitem | menuarrow | menubar | menucheckbox | menuimage | menuitem | menuitemtext | menulist | menulist-button | menulist-text | menulist-textfield | menupopup | menuradio | menuseparator | meterbar | meterchunk | progressbar | progressbar-vertical | progresschunk | progresschunk-vertical | radio | radio-container | radio-label | radiomenuitem | range | range-thumb | resizer | resizerpanel | scale-horizontal | scalethumbend | scalethumb-horizontal | scalethumbstart | scalethumbtick | scalethumb-vertical | scale-vertical | scrollbarbutton-down | scrollbarbutton-left | scrollbarbutton-right | scrollbarbutton-up | scrollbarthumb-horizontal | scrollbarthumb-vertical | scrollbartrack-horizontal | scrollbartrack-vertical | searchfield | separator | sheet | spinner | spinner-downbutton | spinner-textfield | spinner-upbutton | splitter | statusbar | statusbarpanel | tab | tabpanel | tabpanels | tab-scroll-arrow-back | tab-scroll-arrow-forward | textfield | textfield-multiline | toolbar | toolbarbutton | toolbarbutton-dropdown | toolbargripper | toolbox | tooltip | treeheader | treeheadercell | treeheadersortarrow | treeitem | treeline | treetwisty | treetwistyopen | treeview | -moz-mac-unified-toolbar | -moz-win-borderless-glass | -moz-win-browsertabbar-toolbox | -moz-win-communicationstext | -moz-win-communications-toolbox | -moz-win-exclude-glass | -moz-win-glass | -moz-win-mediatext | -moz-win-media-toolbox | -moz-window-button-box | -moz-window-button-box-maximized | -moz-window-button-close | -moz-window-button-maximize | -moz-window-button-minimize | -moz-window-button-restore | -moz-window-frame-bottom | -moz-window-frame-left | -moz-window-frame-right | -moz-window-titlebar | -moz-window-titlebar-maximized")),
    ("-ms-appearance", Definition::Grammar("none | icon | window | desktop | workspace | document | tooltip | dialog | button | push-button | hyperlink | radio | radio-button | checkbox | menu-item | tab | menu | menubar | pull-down-menu | pop-up-menu | list-menu | radio-group | checkbox-group | outline-tree | range | field | combo-box | signature | password | normal")),
    ("-webkit-appearance", Definition::Grammar("auto | none | button | button-bevel | caps-lock-indicator | caret | checkbox | default-button | listbox | listitem | media-fullscreen-button | media-mute-button | media-play-button | media-seek-back-button | media-seek-forward-button | media-slider | media-sliderthumb | menulist | menulist-button | menulist-text | menulist-textfield | push-button | radio | searchfield | searchfield-cancel-button | searchfield-decoration | searchfield-results-button | searchfield-results-decoration | slider-horizontal | slider-vertical | sliderthumb-horizontal | sliderthumb-vertical | square-button | textarea | textfield | scrollbarbutton-down | scrollbarbutton-left | scrollbarbutton-right | scrollbarbutton-up | scrollbargripper-horizontal | scrollbargripper-vertical | scrollbarthumb-horizontal | scrollbarthumb-vertical | scrollbartrack-horizontal | scrollbartrack-vertical")),
    ("-o-appearance", Definition::Grammar("none | window | desktop | workspace | document | tooltip | dialog | button | push-button | hyperlink | radio | radio-button | checkbox | menu-item | tab | menu | menubar | pull-down-menu | pop-up-menu | list-menu | radio-group | checkbox-group | outline-tree | range | field | combo-box | signature | password | normal")),
    ("aspect-ratio", Definition::Grammar("auto || <ratio>")),
    ("backdrop-filter", Definition::Grammar("<filter-function-list> | none")),
    ("backface-visibility", Definition::Grammar("<vis-hid>")),
    ("background", Definition::Grammar("[ <bg-layer> , ]* <final-bg-layer>")),
    ("background-attachment", Definition::Grammar("<attachment>#")),
    ("background-blend-mode", Definition::Grammar("<blend-mode>")),
    ("background-clip", Definition::Grammar("[ <box> | text ]#")),
    ("background-color", Definition::Grammar("<color>")),
    ("background-image", Definition::Grammar("<bg-image>#")),
    ("background-origin", Definition::Grammar("<box>#")),
    ("background-position", Definition::Grammar("<bg-position>#")),
    ("background-position-x", Definition::Grammar("[ center | [ left | right ]? <len-pct>? ]#")),
    ("background-position-y", Definition::Grammar("[ center | [ top | bottom ]? <len-pct>? ]#")),
    ("background-repeat", Definition::Grammar("<repeat-style>#")),
    ("background-size", Definition::Grammar("<bg-size>#")),
    ("baseline-shift", Definition::Grammar("baseline | sub | super | <len-pct>")),
    ("baseline-source", Definition::Grammar("auto | first | last")),
    ("block-size", Definition::Grammar("<width>")),
    ("border-collapse", Definition::Grammar("collapse | separate")),
    ("border-image", Definition::Grammar("[ none | <image> ] || <border-image-slice> [ / <border-image-width> | / <border-image-width>? / <border-image-outset> ]? || <border-image-repeat>")),
    ("border-image-outset", Definition::Grammar("[ <len> | <num> ]{1,4}")),
    ("border-image-repeat", Definition::Grammar("[ stretch | repeat | round | space ]{1,2}")),
    ("border-image-slice", Definition::Grammar("<border-image-slice>")),
    ("border-image-source", Definition::Grammar("<image> | none")),
    ("border-image-width", Definition::Grammar("[ <len-pct> | <num> | auto ]{1,4}")),
    ("border-spacing", Definition::Grammar("<len>{1,2}")),
    ("border-bottom-left-radius", Definition::Grammar("<len-pct>{1,2}")),
    ("border-bottom-right-radius", Definition::Grammar("<len-pct>{1,2}")),
    ("border-end-end-radius", Definition::Grammar("<len-pct>{1,2}")),
    ("border-end-start-radius", Definition::Grammar("<len-pct>{1,2}")),
    ("border-radius", Definition::Grammar("<len-pct0+>{1,4} [ / <len-pct0+>{1,4} ]?")),
    ("border-start-end-radius", Definition::Grammar("<len-pct>{1,2}")),
    ("border-start-start-radius", Definition::Grammar("<len-pct>{1,2}")),
    ("border-top-left-radius", Definition::Grammar("<len-pct>{1,2}")),
    ("border-top-right-radius", Definition::Grammar("<len-pct>{1,2}")),
    ("bottom", Definition::Grammar("<top>")),
    ("box-decoration-break", Definition::Grammar("slice | clone")),
    ("box-shadow", Definition::Grammar("none | <shadow>#")),
    ("box-sizing", Definition::Grammar("content-box | border-box")),
    ("break-after", Definition::Grammar("<break-inside> | always | left | right | page | column")),
    ("break-before", Definition::Grammar("<break-after>")),
    ("break-inside", Definition::Grammar("auto | avoid | avoid-page | avoid-column")),
    ("caret-color", Definition::Grammar("auto | <color>")),
    ("caption-side", Definition::Grammar("top | bottom | inline-start | inline-end")),
    ("clear", Definition::Grammar("none | right | left | both | inline-start | inline-end")),
    ("clip", Definition::Grammar("<rect> | auto")),
    ("clip-path", Definition::Grammar("<url> | [ <basic-shape> || <geometry-box> ] | none")),
    ("clip-rule", Definition::Grammar("<fill-rule>")),
    ("color", Definition::Grammar("<color>")),
    ("color-interpolation", Definition::Grammar("auto | sRGB | linearRGB")),
    ("color-interpolation-filters", Definition::Grammar("<color-interpolation>")),
    ("color-profile", Definition::Any),
    ("color-rendering", Definition::Grammar("auto | optimizeSpeed | optimizeQuality")),
    ("color-scheme", Definition::Grammar("normal | [ light | dark | <custom-ident> ]+ && only?")),
    ("column-count", Definition::Grammar("<int> | auto")),
    ("column-fill", Definition::Grammar("auto | balance")),
    ("column-gap", Definition::Grammar("normal | <len-pct>")),
    ("column-rule", Definition::Grammar("<border-shorthand>")),
    ("column-rule-color", Definition::Grammar("<color>")),
    ("column-rule-style", Definition::Grammar("<border-style>")),
    ("column-rule-width", Definition::Grammar("<border-width>")),
    ("column-span", Definition::Grammar("none | all")),
    ("column-width", Definition::Grammar("<len> | auto")),
    ("columns", Definition::Any),
    ("contain", Definition::Grammar("none | strict | content | [ size || layout || style || paint ]")),
    ("contain-intrinsic-size", Definition::Grammar("<contain-intrinsic>{1,2}")),
    ("container", Definition::Grammar("<container-name> [ / <container-type> ]?")),
    ("container-name", Definition::Grammar("none | <custom-ident>+")),
    ("container-type", Definition::Grammar("normal || [ size | inline-size ]")),
    ("content", Definition::Grammar("normal | none | <content-list> [ / <string> ]?")),
    ("content-visibility", Definition::Grammar("auto | <vis-hid>")),
    ("counter-increment", Definition::Grammar("<counter>")),
    ("counter-reset", Definition::Grammar("<counter>")),
    ("counter-set", Definition::Grammar("<counter>")),
    ("cursor", Definition::Grammar("[ [ <url> | image-set() ] [ <num> <num> ]? , ]* [ auto | default | none | context-menu | help | pointer | progress | wait | cell | crosshair | text | vertical-text | alias | copy | move | no-drop | not-allowed | grab | grabbing | e-resize | n-resize | ne-resize | nw-resize | s-resize | se-resize | sw-resize | w-resize | ew-resize | ns-resize | nesw-resize | nwse-resize | col-resize | row-resize | all-scroll | zoom-in | zoom-out ]")),
    ("cx", Definition::Grammar("<x>")),
    ("cy", Definition::Grammar("<x>")),
    ("d", Definition::Any),
    ("direction", Definition::Grammar("ltr | rtl")),
    ("display", Definition::Grammar("[ <display-outside> || <display-inside> ] | <display-listitem> | <display-internal> | <display-box> | <display-legacy> | -webkit-box | -webkit-inline-box | -ms-flexbox")),
    ("dominant-baseline", Definition::Grammar("auto | text-bottom | alphabetic | ideographic | middle | central | mathematical | hanging | text-top")),
    ("empty-cells", Definition::Grammar("show | hide")),
    ("field-sizing", Definition::Grammar("fixed | content")),
    ("fill", Definition::Grammar("<paint>")),
    ("fill-opacity", Definition::Grammar("<num0-1>")),
    ("fill-rule", Definition::Grammar("nonzero | evenodd")),
    ("filter", Definition::Grammar("<filter-function-list> | <ie-function> | none")),
    ("flex", Definition::Grammar("none | [ <num>{1,2} || <width> ]")),
    ("flex-basis", Definition::Grammar("<width>")),
    ("flex-direction", Definition::Grammar("row | row-reverse | column | column-reverse")),
    ("flex-flow", Definition::Grammar("<flex-direction> || <flex-wrap>")),
    ("flex-grow", Definition::Grammar("<num>")),
    ("flex-shrink", Definition::Grammar("<num>")),
    ("flex-wrap", Definition::Grammar("nowrap | wrap | wrap-reverse")),
    ("float", Definition::Grammar("left | right | none | inline-start | inline-end")),
    ("flood-color", Definition::Any),
    ("flood-opacity", Definition::Grammar("<num0-1>")),
    ("font", Definition::Grammar("<font-short-tweak-no-pct>? <font-short-core> | [ <font-short-tweak-no-pct> || <pct> ]? <font-short-core> | caption | icon | menu | message-box | small-caption | status-bar")),
    ("font-family", Definition::Grammar("[ <generic-family> | <family-name> ]#")),
    ("font-feature-settings", Definition::Grammar("[ <ascii4> [ <int0+> | on | off ]? ]# | normal")),
    ("font-kerning", Definition::Grammar("auto | normal | none")),
    ("font-language-override", Definition::Grammar("normal | <string>")),
    ("font-optical-sizing", Definition::Grammar("auto | none")),
    ("font-palette", Definition::Grammar("none | normal | light | dark | <custom-ident>")),
    ("font-size", Definition::Grammar("<absolute-size> | <relative-size> | <len-pct0+>")),
    ("font-size-adjust", Definition::Grammar("<num> | none")),
    ("font-stretch", Definition::Grammar("<font-stretch-named> | <pct>")),
    ("font-style", Definition::Grammar("normal | italic | oblique <angle>?")),
    ("font-synthesis", Definition::Grammar("none | [ weight || style ]")),
    ("font-synthesis-style", Definition::Grammar("auto | none")),
    ("font-synthesis-weight", Definition::Grammar("auto | none")),
    ("font-synthesis-small-caps", Definition::Grammar("auto | none")),
    ("font-variant", Definition::Grammar("normal | none | [ <font-variant-ligatures> || <font-variant-alternates> || <font-variant-caps> || <font-variant-numeric> || <font-variant-east-asian> ]")),
    ("font-variant-alternates", Definition::Grammar("<font-variant-alternates> | normal")),
    ("font-variant-caps", Definition::Grammar("<font-variant-caps> | normal")),
    ("font-variant-east-asian", Definition::Grammar("<font-variant-east-asian> | normal")),
    ("font-variant-emoji", Definition::Grammar("auto | text | emoji | unicode")),
    ("font-variant-ligatures", Definition::Grammar("<font-variant-ligatures> | normal | none")),
    ("font-variant-numeric", Definition::Grammar("<font-variant-numeric> | normal")),
    ("font-variant-position", Definition::Grammar("normal | sub | super")),
    ("font-variation-settings", Definition::Grammar("normal | [ <string> <num> ]#")),
    ("font-weight", Definition::Grammar("normal | bold | bolder | lighter | <num1-1000>")),
    ("forced-color-adjust", Definition::Grammar("auto | none | preserve-parent-color")),
    ("gap", Definition::Grammar("<column-gap>{1,2}")),
    ("grid", Definition::Grammar("<grid-template> | <grid-template-rows> / [ auto-flow && dense? ] <grid-auto-columns>? | [ auto-flow && dense? ] <grid-auto-rows>? / <grid-template-columns>")),
    ("grid-area", Definition::Grammar("<grid-line> [ / <grid-line> ]{0,3}")),
    ("grid-auto-columns", Definition::Grammar("<track-size>+")),
    ("grid-auto-flow", Definition::Grammar("[ row | column ] || dense")),
    ("grid-auto-rows", Definition::Grammar("<track-size>+")),
    ("grid-column", Definition::Grammar("<grid-line> [ / <grid-line> ]?")),
    ("grid-column-end", Definition::Grammar("<grid-line>")),
    ("grid-column-gap", Definition::Any),
    ("grid-column-start", Definition::Grammar("<grid-line>")),
    ("grid-gap", Definition::Any),
    ("grid-row", Definition::Grammar("<grid-line> [ / <grid-line> ]?")),
    ("grid-row-end", Definition::Grammar("<grid-line>")),
    ("grid-row-gap", Definition::Any),
    ("grid-row-start", Definition::Grammar("<grid-line>")),
    ("grid-template", Definition::Grammar("none | [ <grid-template-rows> / <grid-template-columns> ] | [ <line-names>? <string> <track-size>? <line-names>? ]+ [ / <explicit-track-list> ]?")),
    ("grid-template-areas", Definition::Grammar("none | <string>+")),
    ("grid-template-columns", Definition::Grammar("<grid-template-rows>")),
    ("grid-template-rows", Definition::Grammar("none | <track-list> | <auto-track-list> | subgrid [ <line-names> | repeat( [ <int1+> | auto-fill ] , <line-names>+ ) ]*")),
    ("hanging-punctuation", Definition::Grammar("none | [ first || [ force-end | allow-end ] || last ]")),
    ("height", Definition::Grammar("<width>")),
    ("hyphenate-character", Definition::Grammar("<string> | auto")),
    ("hyphenate-limit-chars", Definition::Grammar("[ auto | <int> ]{1,3}")),
    ("hyphens", Definition::Grammar("none | manual | auto")),
    ("image-orientation", Definition::Grammar("from-image | none | [ <angle> || flip ]")),
    ("image-rendering", Definition::Grammar("auto | smooth | high-quality | crisp-edges | pixelated | optimizeSpeed | optimizeQuality | -webkit-optimize-contrast")),
    ("image-resolution", Definition::Any),
    ("inline-size", Definition::Grammar("<width>")),
    ("inset", Definition::Grammar("<top>{1,4}")),
    ("inset-block", Definition::Grammar("<top>{1,2}")),
    ("inset-block-end", Definition::Grammar("<top>")),
    ("inset-block-start", Definition::Grammar("<top>")),
    ("inset-inline", Definition::Grammar("<top>{1,2}")),
    ("inset-inline-end", Definition::Grammar("<top>")),
    ("inset-inline-start", Definition::Grammar("<top>")),
    ("isolation", Definition::Grammar("auto | isolate")),
    ("justify-content", Definition::Grammar("normal | <content-distribution> | <overflow-position>? [ <content-position> | left | right ]")),
    ("justify-items", Definition::Grammar("normal | stretch | <baseline-position> | [ <overflow-position>? <self-position> ] | [ legacy || [ left | right | center ] ]")),
    ("justify-self", Definition::Grammar("auto | normal | stretch | <baseline-position> | <overflow-position>? [ <self-position> | left | right ]")),
    ("left", Definition::Grammar("<top>")),
    ("letter-spacing", Definition::Grammar("<len> | normal")),
    ("lighting-color", Definition::Grammar("<color>")),
    ("line-height", Definition::Grammar("<line-height>")),
    ("line-break", Definition::Grammar("auto | loose | normal | strict | anywhere")),
    ("list-style", Definition::Grammar("<list-style-position> || <list-style-image> || <list-style-type>")),
    ("list-style-image", Definition::Grammar("<image> | none")),
    ("list-style-position", Definition::Grammar("inside | outside")),
    ("list-style-type", Definition::Grammar("<string> | disc | circle | square | decimal | decimal-leading-zero | lower-roman | upper-roman | lower-greek | lower-latin | upper-latin | armenian | georgian | lower-alpha | upper-alpha | none | symbols()")),
    ("math-depth", Definition::Grammar("auto-add | add(<int>) | <int>")),
    ("math-shift", Definition::Grammar("<math-style>")),
    ("math-style", Definition::Grammar("normal | compact")),
    ("margin", Definition::Grammar("<width>{1,4}")),
    ("margin-bottom", Definition::Grammar("<width>")),
    ("margin-left", Definition::Grammar("<width>")),
    ("margin-right", Definition::Grammar("<width>")),
    ("margin-top", Definition::Grammar("<width>")),
    ("margin-block", Definition::Grammar("<width>{1,2}")),
    ("margin-block-end", Definition::Grammar("<width>")),
    ("margin-block-start", Definition::Grammar("<width>")),
    ("margin-inline", Definition::Grammar("<width>{1,2}")),
    ("margin-inline-end", Definition::Grammar("<width>")),
    ("margin-inline-start", Definition::Grammar("<width>")),
    ("marker", Definition::Any),
    ("marker-end", Definition::Any),
    ("marker-mid", Definition::Any),
    ("marker-start", Definition::Any),
    ("mask", Definition::Grammar("[ [ none | <image> ] || <position> [ / <bg-size> ]? || <repeat-style> || <geometry-box> || [ <geometry-box> | no-clip ] || <compositing-operator> || <masking-mode> ]#")),
    ("mask-border", Definition::Grammar("<mask-border-source> ||<mask-border-slice> [ / <mask-border-width>? [ / <mask-border-outset> ]? ]? ||<mask-border-repeat> || <mask-border-mode>")),
    ("mask-border-mode", Definition::Grammar("<mask-type>")),
    ("mask-border-outset", Definition::Grammar("[ <len> | <num> ]{1,4}")),
    ("mask-border-repeat", Definition::Grammar("[ stretch | repeat | round | space ]{1,2}")),
    ("mask-border-slice", Definition::Grammar("<num-pct>{1,4} fill?")),
    ("mask-border-source", Definition::Grammar("none | <image>")),
    ("mask-border-width", Definition::Grammar("[ <len-pct> | <num> | auto ]{1,4}")),
    ("mask-clip", Definition::Grammar("[ <coord-box> | no-clip ]#")),
    ("mask-composite", Definition::Grammar("<compositing-operator>#")),
    ("mask-image", Definition::Grammar("[ none | <image> ]#")),
    ("mask-mode", Definition::Grammar("<masking-mode>#")),
    ("mask-origin", Definition::Grammar("<coord-box>#")),
    ("mask-position", Definition::Grammar("<position>#")),
    ("mask-repeat", Definition::Grammar("<repeat-style>#")),
    ("mask-size", Definition::Grammar("<bg-size>#")),
    ("mask-type", Definition::Grammar("luminance | alpha")),
    ("max-height", Definition::Grammar("<width-max>")),
    ("max-width", Definition::Grammar("<width-max>")),
    ("min-height", Definition::Grammar("<width>")),
    ("min-width", Definition::Grammar("<width>")),
    ("max-block-size", Definition::Grammar("<width-max>")),
    ("max-inline-size", Definition::Grammar("<width-max>")),
    ("min-block-size", Definition::Grammar("<width>")),
    ("min-inline-size", Definition::Grammar("<width>")),
    ("mix-blend-mode", Definition::Grammar("<blend-mode>")),
    ("object-fit", Definition::Grammar("fill | contain | cover | none | scale-down")),
    ("object-position", Definition::Grammar("<position>")),
    ("object-view-box", Definition::Grammar("none | <inset> | <rect> | <xywh>")),
    ("offset", Definition::Grammar("[ <offset-position>? <offset-path> [<len-pct> || <offset-rotate>]? | <offset-position> ] [ / <offset-anchor> ]?")),
    ("offset-anchor", Definition::Grammar("auto | <position>")),
    ("offset-distance", Definition::Grammar("<len-pct>")),
    ("offset-path", Definition::Grammar("none | [ <ray> | <url> | <basic-shape> ] || <coord-box>")),
    ("offset-position", Definition::Grammar("auto | <position>")),
    ("offset-rotate", Definition::Grammar("[ auto | reverse ] || <angle>")),
    ("opacity", Definition::Grammar("<num0-1> | <pct>")),
    ("order", Definition::Grammar("<int>")),
    ("orphans", Definition::Grammar("<int>")),
    ("outline", Definition::Grammar("[ <color> | invert ] || [ auto | <border-style> ] || <border-width>")),
    ("outline-color", Definition::Grammar("<color> | invert")),
    ("outline-offset", Definition::Grammar("<len>")),
    ("outline-style", Definition::Grammar("<border-style> | auto")),
    ("outline-width", Definition::Grammar("<border-width>")),
    ("overflow", Definition::Grammar("<overflow>{1,2}")),
    ("overflow-anchor", Definition::Grammar("auto | none")),
    ("overflow-block", Definition::Grammar("<overflow>")),
    ("overflow-clip-margin", Definition::Grammar("visual-box | <len0+>")),
    ("overflow-inline", Definition::Grammar("<overflow>")),
    ("overflow-wrap", Definition::Grammar("normal | break-word | anywhere")),
    ("overflow-x", Definition::Grammar("<overflow>")),
    ("overflow-y", Definition::Grammar("<overflow>")),
    ("overscroll-behavior", Definition::Grammar("<overscroll>{1,2}")),
    ("overscroll-behavior-block", Definition::Grammar("<overscroll>")),
    ("overscroll-behavior-inline", Definition::Grammar("<overscroll>")),
    ("overscroll-behavior-x", Definition::Grammar("<overscroll>")),
    ("overscroll-behavior-y", Definition::Grammar("<overscroll>")),
    ("padding", Definition::Grammar("<len-pct0+>{1,4}")),
    ("padding-block", Definition::Grammar("<len-pct0+>{1,2}")),
    ("padding-block-end", Definition::Grammar("<len-pct0+>")),
    ("padding-block-start", Definition::Grammar("<len-pct0+>")),
    ("padding-bottom", Definition::Grammar("<len-pct0+>")),
    ("padding-inline", Definition::Grammar("<len-pct0+>{1,2}")),
    ("padding-inline-end", Definition::Grammar("<len-pct0+>")),
    ("padding-inline-start", Definition::Grammar("<len-pct0+>")),
    ("padding-left", Definition::Grammar("<len-pct0+>")),
    ("padding-right", Definition::Grammar("<len-pct0+>")),
    ("padding-top", Definition::Grammar("<len-pct0+>")),
    ("page", Definition::Grammar("auto | <custom-ident>")),
    ("page-break-after", Definition::Grammar("auto | always | avoid | left | right | recto | verso")),
    ("page-break-before", Definition::Grammar("<page-break-after>")),
    ("page-break-inside", Definition::Grammar("auto | avoid")),
    ("paint-order", Definition::Grammar("normal | [ fill || stroke || markers ]")),
    ("perspective", Definition::Grammar("none | <len0+>")),
    ("perspective-origin", Definition::Grammar("<position>")),
    ("place-content", Definition::Grammar("<align-content> <justify-content>?")),
    ("place-items", Definition::Grammar("[ normal | stretch | <baseline-position> | <self-position> ] [ normal | stretch | <baseline-position> | <self-position> ]?")),
    ("place-self", Definition::Grammar("<align-self> <justify-self>?")),
    ("pointer-events", Definition::Grammar("auto | none | visiblePainted | visibleFill | visibleStroke | visible | painted | fill | stroke | all")),
    ("position", Definition::Grammar("static | relative | absolute | fixed | sticky")),
    ("print-color-adjust", Definition::Grammar("economy | exact")),
    ("quotes", Definition::Any),
    ("r", Definition::Any),
    ("rx", Definition::Grammar("<x> | auto")),
    ("ry", Definition::Grammar("<rx>")),
    ("rendering-intent", Definition::Any),
    ("resize", Definition::Grammar("none | both | horizontal | vertical | block | inline")),
    ("right", Definition::Grammar("<top>")),
    ("rotate", Definition::Grammar("none | [ x | y | z | <num>{3} ]? && <angle>")),
    ("row-gap", Definition::Grammar("<column-gap>")),
    ("ruby-align", Definition::Any),
    ("ruby-position", Definition::Any),
    ("scale", Definition::Grammar("none | <num-pct>{1,3}")),
    ("scroll-behavior", Definition::Grammar("auto | smooth")),
    ("scroll-margin", Definition::Grammar("<len>{1,4}")),
    ("scroll-margin-bottom", Definition::Grammar("<len>")),
    ("scroll-margin-left", Definition::Grammar("<len>")),
    ("scroll-margin-right", Definition::Grammar("<len>")),
    ("scroll-margin-top", Definition::Grammar("<len>")),
    ("scroll-margin-block", Definition::Grammar("<len>{1,2}")),
    ("scroll-margin-block-end", Definition::Grammar("<len>")),
    ("scroll-margin-block-start", Definition::Grammar("<len>")),
    ("scroll-margin-inline", Definition::Grammar("<len>{1,2}")),
    ("scroll-margin-inline-end", Definition::Grammar("<len>")),
    ("scroll-margin-inline-start", Definition::Grammar("<len>")),
    ("scroll-padding", Definition::Grammar("<top>{1,4}")),
    ("scroll-padding-left", Definition::Grammar("<top>")),
    ("scroll-padding-right", Definition::Grammar("<top>")),
    ("scroll-padding-top", Definition::Grammar("<top>")),
    ("scroll-padding-bottom", Definition::Grammar("<top>")),
    ("scroll-padding-block", Definition::Grammar("<top>{1,2}")),
    ("scroll-padding-block-end", Definition::Grammar("<top>")),
    ("scroll-padding-block-start", Definition::Grammar("<top>")),
    ("scroll-padding-inline", Definition::Grammar("<top>{1,2}")),
    ("scroll-padding-inline-end", Definition::Grammar("<top>")),
    ("scroll-padding-inline-start", Definition::Grammar("<top>")),
    ("scroll-snap-align", Definition::Grammar("[ none | start | end | center ]{1,2}")),
    ("scroll-snap-stop", Definition::Grammar("normal | always")),
    ("scroll-snap-type", Definition::Grammar("none | [ x | y | block | inline | both ] [ mandatory | proximity ]?")),
    ("scroll-timeline", Definition::Grammar("[ <scroll-timeline-name> [ <scroll-timeline-axis> || <scroll-timeline-attachment> ]? ]#")),
    ("scroll-timeline-attachment", Definition::Grammar("[ local | defer | ancestor ]#")),
    ("scroll-timeline-axis", Definition::Grammar("<axis>#")),
    ("scroll-timeline-name", Definition::Grammar("none | <custom-ident>#")),
    ("scrollbar-color", Definition::Grammar("auto | dark | light | <color>{2}")),
    ("scrollbar-gutter", Definition::Grammar("auto | stable && both-edges?")),
    ("scrollbar-width", Definition::Grammar("auto | thin | none")),
    ("shape-image-threshold", Definition::Grammar("<num-pct>")),
    ("shape-margin", Definition::Grammar("<len-pct>")),
    ("shape-rendering", Definition::Grammar("auto | optimizeSpeed | crispEdges | geometricPrecision")),
    ("shape-outside", Definition::Grammar("none | [ <basic-shape> || <shape-box> ] | <image>")),
    ("speak", Definition::Grammar("auto | never | always")),
    ("stop-color", Definition::Any),
    ("stop-opacity", Definition::Grammar("<num0-1>")),
    ("stroke", Definition::Grammar("<paint>")),
    ("stroke-dasharray", Definition::Grammar("none | <dasharray>")),
    ("stroke-dashoffset", Definition::Grammar("<len-pct> | <num>")),
    ("stroke-linecap", Definition::Grammar("butt | round | square")),
    ("stroke-linejoin", Definition::Grammar("miter | miter-clip | round | bevel | arcs")),
    ("stroke-miterlimit", Definition::Grammar("<num0+>")),
    ("stroke-opacity", Definition::Grammar("<num0-1>")),
    ("stroke-width", Definition::Grammar("<len-pct> | <num>")),
    ("table-layout", Definition::Grammar("auto | fixed")),
    ("tab-size", Definition::Grammar("<num> | <len>")),
    ("text-align", Definition::Grammar("<text-align> | justify-all")),
    ("text-align-last", Definition::Grammar("<text-align> | auto")),
    ("text-anchor", Definition::Grammar("start | middle | end")),
    ("text-combine-upright", Definition::Grammar("none | all | [ digits <int2-4>? ]")),
    ("text-decoration", Definition::Grammar("<text-decoration-line> || <text-decoration-style> || <color>")),
    ("text-decoration-color", Definition::Grammar("<color>")),
    ("text-decoration-line", Definition::Grammar("none | [ underline || overline || line-through || blink ]")),
    ("text-decoration-skip", Definition::Grammar("none | auto")),
    ("text-decoration-skip-ink", Definition::Grammar("none | auto | all")),
    ("text-decoration-style", Definition::Grammar("solid | double | dotted | dashed | wavy")),
    ("text-decoration-thickness", Definition::Grammar("auto | from-font | <len-pct>")),
    ("text-emphasis", Definition::Grammar("<text-emphasis-style> || <color>")),
    ("text-emphasis-color", Definition::Grammar("<color>")),
    ("text-emphasis-style", Definition::Grammar("none | <string> | [ [ filled | open ] || [ dot | circle | double-circle | triangle | sesame ] ]")),
    ("text-emphasis-position", Definition::Grammar("[ over | under ] && [ right | left ]?")),
    ("text-indent", Definition::Grammar("<len-pct> && hanging? && each-line?")),
    ("text-justify", Definition::Grammar("auto | none | inter-word | inter-character")),
    ("text-orientation", Definition::Grammar("mixed | upright | sideways")),
    ("text-overflow", Definition::Grammar("clip | ellipsis")),
    ("text-rendering", Definition::Grammar("auto | optimizeSpeed | optimizeLegibility | geometricPrecision")),
    ("text-shadow", Definition::Grammar("none | [ <color>? && <len>{2,3} ]#")),
    ("text-size-adjust", Definition::Grammar("auto | none | <pct0+>")),
    ("text-transform", Definition::Grammar("none | [ capitalize|uppercase|lowercase ] || full-width || full-size-kana")),
    ("text-underline-offset", Definition::Grammar("<len-pct> | auto")),
    ("text-underline-position", Definition::Grammar("auto | [ under || [ left | right ] ]")),
    ("text-wrap", Definition::Grammar("wrap | nowrap | balance | stable | pretty")),
    ("top", Definition::Grammar("auto | <len-pct>")),
    ("touch-action", Definition::Grammar("auto | none | pan-x | pan-y | pan-left | pan-right | pan-up | pan-down | manipulation")),
    ("transform", Definition::Grammar("none | <fn:transform>+")),
    ("transform-box", Definition::Grammar("content-box | border-box | fill-box | stroke-box | view-box")),
    ("transform-origin", Definition::Grammar("[ left | center | right | <len-pct> ] [ top | center | bottom | <len-pct> ] <len>? | [ left | center | right | top | bottom | <len-pct> ] | [ [ center | left | right ] && [ center | top | bottom ] ] <len>?")),
    ("transform-style", Definition::Grammar("flat | preserve-3d")),
    ("transition", Definition::Grammar("[ [ none | [ all | <custom-ident> ]# ] || <time> || <timing-function> || <time> || <txbhv> ]#")),
    ("transition-behavior", Definition::Grammar("<txbhv>#")),
    ("transition-delay", Definition::Grammar("<time>#")),
    ("transition-duration", Definition::Grammar("<time>#")),
    ("transition-property", Definition::Grammar("none | [ all | <custom-ident> ]#")),
    ("transition-timing-function", Definition::Grammar("<timing-function>#")),
    ("translate", Definition::Grammar("none | <len-pct> [ <len-pct> <len>? ]?")),
    ("unicode-range", Definition::Grammar("<unicode-range>#")),
    ("unicode-bidi", Definition::Grammar("normal | embed | isolate | bidi-override | isolate-override | plaintext")),
    ("user-select", Definition::Grammar("auto | text | none | contain | all")),
    ("vertical-align", Definition::Grammar("auto | use-script | baseline | sub | super | top | text-top | central | middle | bottom | text-bottom | <len-pct>")),
    ("visibility", Definition::Grammar("<vis-hid> | collapse")),
    ("white-space", Definition::Grammar("normal | pre | nowrap | pre-wrap | break-spaces | pre-line")),
    ("widows", Definition::Grammar("<int>")),
    ("width", Definition::Grammar("<width>")),
    ("will-change", Definition::Grammar("auto | <animateable-feature>#")),
    ("word-break", Definition::Grammar("normal | keep-all | break-all | break-word")),
    ("word-spacing", Definition::Grammar("<len> | normal")),
    ("word-wrap", Definition::Grammar("normal | break-word | anywhere")),
    ("writing-mode", Definition::Grammar("horizontal-tb | vertical-rl | vertical-lr | lr-tb | rl-tb | tb-rl | bt-rl | tb-lr | bt-lr | lr-bt | rl-bt | lr | rl | tb")),
    ("x", Definition::Grammar("<len-pct> | <num>")),
    ("y", Definition::Grammar("<x>")),
    ("z-index", Definition::Grammar("<int> | auto")),
    ("zoom", Definition::Grammar("<num> | <pct> | normal")),
    ("-webkit-box-reflect", Definition::Grammar("[ above | below | right | left ]? <len>? <image>?")),
    ("-webkit-text-fill-color", Definition::Grammar("<color>")),
    ("-webkit-text-stroke", Definition::Grammar("<border-width> || <color>")),
    ("-webkit-text-stroke-color", Definition::Grammar("<color>")),
    ("-webkit-text-stroke-width", Definition::Grammar("<border-width>")),
    ("-webkit-user-modify", Definition::Grammar("read-only | read-write | write-only")),
    ("border", Definition::Grammar("<border-shorthand>")),
    ("border-color", Definition::Grammar("<color>{1,4}")),
    ("border-style", Definition::Grammar("<border-style>{1,4}")),
    ("border-width", Definition::Grammar("<border-width>{1,4}")),
    ("border-bottom", Definition::Grammar("<border-shorthand>")),
    ("border-bottom-color", Definition::Grammar("<color>")),
    ("border-bottom-style", Definition::Grammar("<border-style>")),
    ("border-bottom-width", Definition::Grammar("<border-width>")),
    ("border-left", Definition::Grammar("<border-shorthand>")),
    ("border-left-color", Definition::Grammar("<color>")),
    ("border-left-style", Definition::Grammar("<border-style>")),
    ("border-left-width", Definition::Grammar("<border-width>")),
    ("border-right", Definition::Grammar("<border-shorthand>")),
    ("border-right-color", Definition::Grammar("<color>")),
    ("border-right-style", Definition::Grammar("<border-style>")),
    ("border-right-width", Definition::Grammar("<border-width>")),
    ("border-top", Definition::Grammar("<border-shorthand>")),
    ("border-top-color", Definition::Grammar("<color>")),
    ("border-top-style", Definition::Grammar("<border-style>")),
    ("border-top-width", Definition::Grammar("<border-width>")),
    ("border-block", Definition::Grammar("<border-shorthand>")),
    ("border-block-color", Definition::Grammar("<color>{1,2}")),
    ("border-block-style", Definition::Grammar("<border-style>{1,2}")),
    ("border-block-width", Definition::Grammar("<border-width>{1,2}")),
    ("border-block-end", Definition::Grammar("<border-shorthand>")),
    ("border-block-end-color", Definition::Grammar("<color>")),
    ("border-block-end-style", Definition::Grammar("<border-style>")),
    ("border-block-end-width", Definition::Grammar("<border-width>")),
    ("border-block-start", Definition::Grammar("<border-shorthand>")),
    ("border-block-start-color", Definition::Grammar("<color>")),
    ("border-block-start-style", Definition::Grammar("<border-style>")),
    ("border-block-start-width", Definition::Grammar("<border-width>")),
    ("border-inline", Definition::Grammar("<border-shorthand>")),
    ("border-inline-color", Definition::Grammar("<color>{1,2}")),
    ("border-inline-style", Definition::Grammar("<border-style>{1,2}")),
    ("border-inline-width", Definition::Grammar("<border-width>{1,2}")),
    ("border-inline-end", Definition::Grammar("<border-shorthand>")),
    ("border-inline-end-color", Definition::Grammar("<color>")),
    ("border-inline-end-style", Definition::Grammar("<border-style>")),
    ("border-inline-end-width", Definition::Grammar("<border-width>")),
    ("border-inline-start", Definition::Grammar("<border-shorthand>")),
    ("border-inline-start-color", Definition::Grammar("<color>")),
    ("border-inline-start-style", Definition::Grammar("<border-style>")),
    ("border-inline-start-width", Definition::Grammar("<border-width>")),
    ("contain-intrinsic-width", Definition::Grammar("<contain-intrinsic>")),
    ("contain-intrinsic-height", Definition::Grammar("<contain-intrinsic>")),
    ("contain-intrinsic-block-size", Definition::Grammar("<contain-intrinsic>")),
    ("contain-intrinsic-inline-size", Definition::Grammar("<contain-intrinsic>")),
];

const TYPES: &[(&str, &str)] = &[
    ("<absolute-size>", "xx-small | x-small | small | medium | large | x-large | xx-large"),
    ("<alpha>", "/ <num-pct-none>"),
    ("<animateable-feature>", "scroll-position | contents | <animateable-feature-name>"),
    ("<animation-direction>", "normal | reverse | alternate | alternate-reverse"),
    ("<animation-fill-mode>", "none | forwards | backwards | both"),
    ("<animation-timeline>", "auto | none | <custom-ident> | scroll( [ [ root | nearest | self ] || <axis> ]? ) | view( [ <axis> || [ [ auto | <len-pct> ]{1,2} ]# ]? )"),
    ("<attachment>", "scroll | fixed | local"),
    ("<auto-repeat>", "repeat( [ auto-fill | auto-fit ] , [ <line-names>? <fixed-size> ]+ <line-names>? )"),
    ("<auto-track-list>", "[ <line-names>? [ <fixed-size> | <fixed-repeat> ] ]* <line-names>? <auto-repeat> [ <line-names>? [ <fixed-size> | <fixed-repeat> ] ]* <line-names>?"),
    ("<axis>", "block | inline | vertical | horizontal"),
    ("<baseline-position>", "[ first | last ]? baseline"),
    ("<basic-shape>", "<fn:basicShape>"),
    ("<bg-image>", "<image> | none"),
    ("<bg-layer>", "<bg-image> || <bg-position> [ / <bg-size> ]? || <repeat-style> || <attachment> || <box>{1,2}"),
    ("<bg-position>", "[ center | [ left | right ] <len-pct>? ] && [ center | [ top | bottom ] <len-pct>? ] | [ left | center | right | <len-pct> ] [ top | center | bottom | <len-pct> ] | [ left | center | right | top | bottom | <len-pct> ]"),
    ("<bg-size>", "[ <len-pct> | auto ]{1,2} | cover | contain"),
    ("<blend-mode>", "normal | multiply | screen | overlay | darken | lighten | color-dodge | color-burn | hard-light | soft-light | difference | exclusion | hue | saturation | color | luminosity | plus-darker | plus-lighter"),
    ("<border-image-slice>", "<num-pct0+> && <num-pct0+>? && <num-pct0+>? && <num-pct0+>? && fill?"),
    ("<border-radius-round>", "round <border-radius>"),
    ("<border-shorthand>", "<border-width> || <border-style> || <color>"),
    ("<border-style>", "none | hidden | dotted | dashed | solid | double | groove | ridge | inset | outset"),
    ("<border-width>", "<len> | thin | medium | thick"),
    ("<box>", "padding-box | border-box | content-box"),
    ("<box-fsv>", "fill-box | stroke-box | view-box"),
    ("<color>", "<named-or-hex-color> | <fn:color>"),
    ("<compositing-operator>", "add | subtract | intersect | exclude"),
    ("<contain-intrinsic>", "auto? [ none | <len> ]"),
    ("<content-distribution>", "space-between | space-around | space-evenly | stretch"),
    ("<content-list>", "[ <string> | <image> | <attr> | content( text | before | after | first-letter | marker ) | counter() | counters() | leader() | open-quote | close-quote | no-open-quote | no-close-quote | target-counter() | target-counters() | target-text() ]+"),
    ("<content-position>", "center | start | end | flex-start | flex-end"),
    ("<coord-box>", "<box> | <box-fsv>"),
    ("<counter>", "[ <ident-not-none> <int>? ]+ | none"),
    ("<dasharray>", "[ <len-pct0+> | <num0+> ] [ ,? [ <len-pct0+> | <num0+> ] ]*"),
    ("<display-box>", "contents | none"),
    ("<display-inside>", "flow | flow-root | table | flex | grid | ruby"),
    ("<display-internal>", "table-row-group | table-header-group | table-footer-group | table-row | table-cell | table-column-group | table-column | table-caption | ruby-base | ruby-text | ruby-base-container | ruby-text-container"),
    ("<display-legacy>", "inline-block | inline-table | inline-flex | inline-grid"),
    ("<display-listitem>", "<display-outside>? && [ flow | flow-root ]? && list-item"),
    ("<display-outside>", "block | inline | run-in"),
    ("<explicit-track-list>", "[ <line-names>? <track-size> ]+ <line-names>?"),
    ("<family-name>", "<string> | <custom-ident>+"),
    ("<filter-function-list>", "[ <fn:filter> | <url> ]+"),
    ("<final-bg-layer>", "<color> || <bg-image> || <bg-position> [ / <bg-size> ]? || <repeat-style> || <attachment> || <box>{1,2}"),
    ("<fixed-repeat>", "repeat( [ <int1+> ] , [ <line-names>? <fixed-size> ]+ <line-names>? )"),
    ("<fixed-size>", "<len-pct> | minmax( <len-pct> , <track-breadth> | <inflexible-breadth> , <len-pct> )"),
    ("<flex-direction>", "row | row-reverse | column | column-reverse"),
    ("<flex-wrap>", "nowrap | wrap | wrap-reverse"),
    ("<font-short-core>", "<font-size> [ / <line-height> ]? <font-family>"),
    ("<font-short-tweak-no-pct>", "<font-style> || [ normal | small-caps ] || <font-weight> || <font-stretch-named>"),
    ("<font-stretch-named>", "normal | ultra-condensed | extra-condensed | condensed | semi-condensed | semi-expanded | expanded | extra-expanded | ultra-expanded"),
    ("<font-variant-alternates>", "stylistic() || historical-forms || styleset() || character-variant() || swash() || ornaments() || annotation()"),
    ("<font-variant-caps>", "small-caps | all-small-caps | petite-caps | all-petite-caps | unicase | titling-caps"),
    ("<font-variant-east-asian>", "[ jis78|jis83|jis90|jis04|simplified|traditional ] || [ full-width | proportional-width ] || ruby"),
    ("<font-variant-ligatures>", "[ common-ligatures | no-common-ligatures ] || [ discretionary-ligatures | no-discretionary-ligatures ] || [ historical-ligatures | no-historical-ligatures ] || [ contextual | no-contextual ]"),
    ("<font-variant-numeric>", "[ lining-nums | oldstyle-nums ] || [ proportional-nums | tabular-nums ] || [ diagonal-fractions | stacked-fractions ] || ordinal || slashed-zero"),
    ("<generic-family>", "serif | sans-serif | cursive | fantasy | monospace | system-ui | emoji | math | fangsong | ui-serif | ui-sans-serif | ui-monospace | ui-rounded"),
    ("<geometry-box>", "<shape-box> | <box-fsv>"),
    ("<gradient>", "radial-gradient() | linear-gradient() | conic-gradient() | gradient() | repeating-radial-gradient() | repeating-linear-gradient() | repeating-conic-gradient() | repeating-gradient()"),
    ("<grid-line>", "auto | [ <int> && <ident-for-grid>? ] | <ident-for-grid> | [ span && [ <int> || <ident-for-grid> ] ]"),
    ("<image>", "<image-no-set> | image-set( <image-set># )"),
    ("<image-no-set>", "<url> | <gradient> | -webkit-cross-fade()"),
    ("<image-set>", "[ <image-no-set> | <string> ] [ <resolution> || type( <string> ) ]"),
    ("<inflexible-breadth>", "<len-pct> | min-content | max-content | auto"),
    ("<inset>", "inset( <inset-arg> )"),
    ("<inset-arg>", "<len-pct>{1,4} <border-radius-round>?"),
    ("<line-height>", "<num> | <len-pct> | normal"),
    ("<line-names>", "\"[\" <ident-for-grid> \"]\""),
    ("<masking-mode>", "alpha | luminance | match-source"),
    ("<overflow-position>", "unsafe | safe"),
    ("<overflow>", "<vis-hid> | clip | scroll | auto | overlay"),
    ("<overscroll>", "contain | none | auto"),
    ("<paint>", "none | <color> | <url> [ none | <color> ]? | context-fill | context-stroke"),
    ("<position>", "[ [ left | right ] <len-pct> ] && [ [ top | bottom ] <len-pct> ] | [ left | center | right | <len-pct> ] [ top | center | bottom | <len-pct> ]? | [ left | center | right ] || [ top | center | bottom ]"),
    ("<ratio>", "<num0+> [ / <num0+> ]?"),
    ("<ray>", "ray( <angle> && [closest-side | closest-corner | farthest-side | farthest-corner | sides]? && contain? && [at <position>]? )"),
    ("<rect>", "rect( <rect-arg> )"),
    ("<rect-arg>", "[ <len> | auto ]#{4} <border-radius-round>?"),
    ("<relative-size>", "smaller | larger"),
    ("<repeat-style>", "repeat-x | repeat-y | [ repeat | space | round | no-repeat ]{1,2}"),
    ("<rgb-xyz>", "srgb|srgb-linear|display-p3|a98-rgb|prophoto-rgb|rec2020|xyz|xyz-d50|xyz-d65"),
    ("<self-position>", "center | start | end | self-start | self-end | flex-start | flex-end"),
    ("<shadow>", "inset? && [ <len>{2,4} && <color>? ]"),
    ("<shape-box>", "<box> | margin-box"),
    ("<shape-radius>", "<len-pct0+> | closest-side | farthest-side"),
    ("<timing-function>", "linear|ease|ease-in|ease-out|ease-in-out|step-start|step-end | cubic-bezier( <num0-1> , <num> , <num0-1> , <num> ) | linear( [ <num> && [ <pct>{1,2} ]? ]# ) | steps( <int> [ , [ jump-start | jump-end | jump-none | jump-both | start | end ] ]? )"),
    ("<text-align>", "start | end | left | right | center | justify | match-parent"),
    ("<track-breadth>", "<len-pct> | <flex> | min-content | max-content | auto"),
    ("<track-list>", "[ <line-names>? [ <track-size> | <track-repeat> ] ]+ <line-names>?"),
    ("<track-repeat>", "repeat( [ <int1+> ] , [ <line-names>? <track-size> ]+ <line-names>? )"),
    ("<track-size>", "<track-breadth> | minmax( <inflexible-breadth> , <track-breadth> ) | fit-content( <len-pct> )"),
    ("<txbhv>", "normal | allow-discrete"),
    ("<url>", "<uri> | src( <string> [ <ident> | <func> ]* )"),
    ("<vis-hid>", "visible | hidden"),
    ("<width>", "auto | <width-base>"),
    ("<width-base>", "<len-pct> | min-content | max-content | -moz-available | -webkit-fill-available | fit-content"),
    ("<width-max>", "none | <width-base>"),
    ("<xywh>", "xywh( <xywh-arg> )"),
    ("<xywh-arg>", "<len-pct>{2} <len-pct0+>{2} <border-radius-round>?"),
];

const COUNTER_STYLE_DESCRIPTORS: &[(&str, Definition)] = &[
    ("additive-symbols", Definition::Grammar("<pad>#")),
    ("fallback", Definition::Grammar("<ident-not-none>")),
    ("negative", Definition::Grammar("<prefix>{1,2}")),
    ("pad", Definition::Grammar("<int0+> && <prefix>")),
    ("prefix", Definition::Grammar("<string> | <image> | <custom-ident>")),
    ("range", Definition::Grammar("[ [ <int> | infinite ]{2} ]# | auto")),
    ("speak-as", Definition::Grammar("auto | bullets | numbers | words | spell-out | <ident-not-none>")),
    ("suffix", Definition::Grammar("<prefix>")),
    ("symbols", Definition::Grammar("<prefix>+")),
    ("system", Definition::Grammar("cyclic | numeric | alphabetic | symbolic | additive | [fixed <int>?] | [ extends <ident-not-none> ]")),
];

const FONT_FACE_DESCRIPTORS: &[(&str, Definition)] = &[
    ("ascent-override", Definition::Grammar("[ normal | <pct0+> ]{1,2}")),
    ("descent-override", Definition::Grammar("[ normal | <pct0+> ]{1,2}")),
    ("font-display", Definition::Grammar("auto | block | swap | fallback | optional")),
    ("font-stretch", Definition::Grammar("auto | <font-stretch>{1,2}")),
    ("font-style", Definition::Grammar("auto | normal | italic | oblique <angle>{0,2}")),
    ("font-weight", Definition::Grammar("auto | [ normal | bold | <num1-1000> ]{1,2}")),
    ("line-gap-override", Definition::Grammar("[ normal | <pct0+> ]{1,2}")),
    ("size-adjust", Definition::Grammar("<pct0+>")),
    ("src", Definition::Grammar("[ url() [ format( <string># ) ]? | local( <family-name> ) ]#")),
    ("font-family", Definition::Grammar("[ <generic-family> | <family-name> ]#")),
    ("font-size", Definition::Grammar("<absolute-size> | <relative-size> | <len-pct0+>")),
    ("font-variant", Definition::Grammar("normal | none | [ <font-variant-ligatures> || <font-variant-alternates> || <font-variant-caps> || <font-variant-numeric> || <font-variant-east-asian> ]")),
    ("font-variation-settings", Definition::Grammar("normal | [ <string> <num> ]#")),
    ("unicode-range", Definition::Grammar("<unicode-range>#")),
];

const FONT_PALETTE_VALUES_DESCRIPTORS: &[(&str, Definition)] = &[
    ("base-palette", Definition::Grammar("light | dark | <int0+>")),
    ("override-colors", Definition::Grammar("[ <int0+> <color> ]#")),
    ("font-family", Definition::Grammar("[ <generic-family> | <family-name> ]#")),
];

const PAGE_DESCRIPTORS: &[(&str, Definition)] = &[
    ("bleed", Definition::Grammar("auto | <len>")),
    ("marks", Definition::Grammar("none | [ crop || cross ]")),
    ("size", Definition::Grammar("<len>{1,2} | auto | [ [ A3 | A4 | A5 | B4 | B5 | JIS-B4 | JIS-B5 | ledger | legal | letter ] || [ portrait | landscape ] ]")),
];

const PROPERTY_DESCRIPTORS: &[(&str, Definition)] = &[
    ("inherits", Definition::Grammar("true | false")),
    ("initial-value", Definition::Any),
    ("syntax", Definition::Grammar("<string>")),
];

const VIEWPORT_DESCRIPTORS: &[(&str, Definition)] = &[
    ("height", Definition::Grammar("[ auto | device-width | device-height | <len-pct0+> ]{1,2}")),
    ("max-height", Definition::Grammar("auto | device-width | device-height | <len-pct0+>")),
    ("max-width", Definition::Grammar("auto | device-width | device-height | <len-pct0+>")),
    ("max-zoom", Definition::Grammar("auto | <num-pct0+>")),
    ("min-height", Definition::Grammar("auto | device-width | device-height | <len-pct0+>")),
    ("min-width", Definition::Grammar("auto | device-width | device-height | <len-pct0+>")),
    ("min-zoom", Definition::Grammar("auto | <num-pct0+>")),
    ("orientation", Definition::Grammar("auto | portrait | landscape")),
    ("user-zoom", Definition::Grammar("zoom | fixed")),
    ("width", Definition::Grammar("[ auto | device-width | device-height | <len-pct0+> ]{1,2}")),
    ("zoom", Definition::Grammar("auto | <num-pct0+>")),
];

pub const SCOPES: &[Scope] = &[
    Scope {
        name: "counter-style",
        all_properties: false,
        descriptors: COUNTER_STYLE_DESCRIPTORS,
    },
    Scope {
        name: "font-face",
        all_properties: false,
        descriptors: FONT_FACE_DESCRIPTORS,
    },
    Scope {
        name: "font-palette-values",
        all_properties: false,
        descriptors: FONT_PALETTE_VALUES_DESCRIPTORS,
    },
    Scope {
        name: "page",
        all_properties: true,
        descriptors: PAGE_DESCRIPTORS,
    },
    Scope {
        name: "property",
        all_properties: false,
        descriptors: PROPERTY_DESCRIPTORS,
    },
    Scope {
        name: "viewport",
        all_properties: false,
        descriptors: VIEWPORT_DESCRIPTORS,
    },
];

const COLOR_FUNCTIONS: &[(&str, &str)] = &[
    ("color-mix", "in [ srgb | srgb-linear | lab | oklab | xyz | xyz-d50 | xyz-d65 | [ hsl | hwb | lch | oklch ] [ [ shorter | longer | increasing | decreasing ] hue ]? ] , [ <color> && <pct0-100>? ]#{2}"),
    ("color", "from <color> [ <custom-prop> [ <num-pct-none> <custom-ident> ]# | <rgb-xyz> [ <num-pct-none> | r | g | b | x | y | z ]{3} ] [ / <num-pct-none> | r | g | b | x | y | z ]? | [ <rgb-xyz> <num-pct-none>{3} | <custom-prop> <num-pct-none># ] <alpha>?"),
    ("hsl", "<hue> , <pct>#{2} [ , <num-pct0+> ]? | [ <hue> | none ] <num-pct-none>{2} <alpha>? | from <color> [ <hue> | <rel-hsl> ] <rel-hsl-num-pct>{2} [ / <rel-hsl-num-pct> ]?"),
    ("hwb", "[ <hue> | none ] <num-pct-none>{2} <alpha>? | from <color> [ <hue> | <rel-hwb> ] <rel-hwb-num-pct>{2} [ / <rel-hwb-num-pct> ]?"),
    ("lab", "<num-pct-none>{3} <alpha>? | from <color> <rel-lab-num-pct>{3} [ / <rel-lab-num-pct> ]?"),
    ("lch", "<num-pct-none>{2} [ <hue> | none ] <alpha>? | from <color> <rel-lch-num-pct>{2} [ <hue> | <rel-lch> ] [ / <rel-lch-num-pct> ]?"),
    ("light-dark", "<color>#{2}"),
    ("rgb", "[ <num>#{3} | <pct>#{3} ] [ , <num-pct0+> ]? | <num-pct-none>{3} <alpha>? | from <color> <rel-rgb-num-pct>{3} [ / <rel-rgb-num-pct> ]?"),
    ("hsla", "<hue> , <pct>#{2} [ , <num-pct0+> ]? | [ <hue> | none ] <num-pct-none>{2} <alpha>? | from <color> [ <hue> | <rel-hsl> ] <rel-hsl-num-pct>{2} [ / <rel-hsl-num-pct> ]?"),
    ("rgba", "[ <num>#{3} | <pct>#{3} ] [ , <num-pct0+> ]? | <num-pct-none>{3} <alpha>? | from <color> <rel-rgb-num-pct>{3} [ / <rel-rgb-num-pct> ]?"),
    ("oklab", "<num-pct-none>{3} <alpha>? | from <color> <rel-lab-num-pct>{3} [ / <rel-lab-num-pct> ]?"),
    ("oklch", "<num-pct-none>{2} [ <hue> | none ] <alpha>? | from <color> <rel-lch-num-pct>{2} [ <hue> | <rel-lch> ] [ / <rel-lch-num-pct> ]?"),
];

const FILTER_FUNCTIONS: &[(&str, &str)] = &[
    ("blur", "<len>?"),
    ("brightness", "<num-pct>?"),
    ("contrast", "<num-pct>?"),
    ("drop-shadow", "[ <len>{2,3} && <color>? ]?"),
    ("grayscale", "<num-pct>?"),
    ("hue-rotate", "<angle-or-0>?"),
    ("invert", "<num-pct>?"),
    ("opacity", "<num-pct>?"),
    ("saturate", "<num-pct>?"),
    ("sepia", "<num-pct>?"),
];

const BASIC_SHAPE_FUNCTIONS: &[(&str, &str)] = &[
    ("circle", "<shape-radius> [ at <position> ]?"),
    ("ellipse", "[ <shape-radius>{2} ]? [ at <position> ]?"),
    ("inset", "<inset-arg>"),
    ("path", "[ <fill-rule> , ]? <string>"),
    ("polygon", "[ <fill-rule> , ]? [ <len-pct> <len-pct> ]#"),
    ("rect", "<rect-arg>"),
    ("xywh", "<xywh-arg>"),
];

const TRANSFORM_FUNCTIONS: &[(&str, &str)] = &[
    ("matrix", "<num>#{6}"),
    ("matrix3d", "<num>#{16}"),
    ("perspective", "<len0+> | none"),
    ("rotate", "<angle-or-0> | none"),
    ("rotate3d", "<num>#{3} , <angle-or-0>"),
    ("rotateX", "<angle-or-0>"),
    ("rotateY", "<angle-or-0>"),
    ("rotateZ", "<angle-or-0>"),
    ("scale", "[ <num-pct> ]#{1,2} | none"),
    ("scale3d", "<num-pct>#{3}"),
    ("scaleX", "<num-pct>"),
    ("scaleY", "<num-pct>"),
    ("scaleZ", "<num-pct>"),
    ("skew", "<angle-or-0> [ , <angle-or-0> ]?"),
    ("skewX", "<angle-or-0>"),
    ("skewY", "<angle-or-0>"),
    ("translate", "<len-pct>#{1,2} | none"),
    ("translate3d", "<len-pct>#{2} , <len>"),
    ("translateX", "<len-pct>"),
    ("translateY", "<len-pct>"),
    ("translateZ", "<len>"),
];

pub const FUNCTION_GROUPS: &[FunctionGroup] = &[
    FunctionGroup {
        name: "color",
        functions: COLOR_FUNCTIONS,
    },
    FunctionGroup {
        name: "filter",
        functions: FILTER_FUNCTIONS,
    },
    FunctionGroup {
        name: "basicShape",
        functions: BASIC_SHAPE_FUNCTIONS,
    },
    FunctionGroup {
        name: "transform",
        functions: TRANSFORM_FUNCTIONS,
    },
];

lazy_static! {
    static ref PROPERTY_MAP: HashMap<&'static str, Definition> = PROPERTIES.iter().copied().collect();
    static ref TYPE_MAP: HashMap<&'static str, &'static str> = TYPES.iter().copied().collect();
}

/// Definition of a property by its lowercase name
pub fn property(name: &str) -> Option<Definition> {
    PROPERTY_MAP.get(name).copied()
}

/// Grammar of a named type such as `<bg-layer>`
pub fn named_type(name: &str) -> Option<&'static str> {
    TYPE_MAP.get(name).copied()
}

/// Descriptor table of an at-rule (lowercase name without `@`)
pub fn scope(name: &str) -> Option<&'static Scope> {
    SCOPES.iter().find(|s| s.name == name)
}

pub fn function_group(name: &str) -> Option<&'static FunctionGroup> {
    FUNCTION_GROUPS.iter().find(|g| g.name.eq_ignore_ascii_case(name))
}

impl Scope {
    pub fn descriptor(&self, name: &str) -> Option<Definition> {
        self.descriptors.iter().find(|(n, _)| *n == name).map(|(_, d)| *d)
    }
}

impl FunctionGroup {
    /// Grammar of the arguments of a function of this group. Names are compared ignoring case.
    pub fn function(&self, name: &str) -> Option<&'static str> {
        self.functions
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, g)| *g)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.functions.iter().map(|(n, _)| *n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups() {
        assert_eq!(property("accent-color"), Some(Definition::Grammar("auto | <color>")));
        assert_eq!(property("quotes"), Some(Definition::Any));
        assert_eq!(property("bogus"), None);
        assert!(named_type("<color>").is_some());

        let page = scope("page");
        assert!(page.is_some_and(|s| s.all_properties));
        assert!(scope("font-face").is_some_and(|s| s.descriptor("src").is_some()));
        assert_eq!(scope("property").and_then(|s| s.descriptor("initial-value")), Some(Definition::Any));
        assert!(scope("viewport").is_some_and(|s| s.descriptor("user-zoom").is_some()));
        assert!(scope("media").is_none());
    }

    #[test]
    fn function_names_ignore_case() {
        let transform = function_group("transform");
        assert!(transform.and_then(|g| g.function("rotatex")).is_some());
        assert!(transform.is_some_and(|g| g.names().any(|n| n == "rotateX")));
        assert!(function_group("basicshape").is_some());
        assert!(function_group("color").and_then(|g| g.function("rgba")).is_some());
    }
}
