use super::{HelpBook, HelpFlag, HelpTopic, Section};

pub(crate) fn book() -> HelpBook<'static> {
    HelpBook {
        title: "Journal CLI",
        usage: "journal <command> [options]  (or: jn <command>)",
        topics: ALL_TOPICS,
        footer: &[
            "Use `journal help <topic>` for focused docs, e.g. `journal help new` or `journal help session`.",
        ],
    }
}

const ALL_TOPICS: &[HelpTopic<'static>] = &[
    HelpTopic {
        name: "new",
        summary: "Write a new journal entry with the rich-text editor.",
        usage: "journal new [--plain] [--script <file>]",
        details: &[
            "Reads one session command per line from stdin, or from a script file when --script is given.",
            "On a terminal the entry and toolbar are shown after every editing command; piped input stays quiet until you ask with `show`, `toolbar` or `spans`.",
            "The session ends at `quit` or end of input.",
        ],
        flags: &[
            HelpFlag {
                name: "--plain",
                desc: "Disable colour in toolbar, span and palette output.",
            },
            HelpFlag {
                name: "-s, --script <file>",
                desc: "Run session commands from a file instead of stdin.",
            },
        ],
        aliases: &[],
        section: Section::Command,
        examples: &[
            "journal new",
            "printf 'bold\\ntype Dear diary\\nspans\\n' | journal new --plain",
            "jn new --script morning.txt",
        ],
    },
    HelpTopic {
        name: "colors",
        summary: "List the colour palette with swatches.",
        usage: "journal colors [--plain]",
        details: &[
            "Shows JOURNAL_COLORS entries first, then the built-in colours.",
            "Swatch text is black or white depending on the colour's brightness.",
        ],
        flags: &[HelpFlag {
            name: "--plain",
            desc: "Print names without swatches.",
        }],
        aliases: &["palette"],
        section: Section::Command,
        examples: &["journal colors", "NO_COLOR=1 jn colors"],
    },
    HelpTopic {
        name: "help",
        summary: "Show this overview or a single topic.",
        usage: "journal help [topic]",
        details: &[
            "Long output is paged through $PAGER (default `less -R`) on a terminal.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Command,
        examples: &["journal help styling"],
    },
    HelpTopic {
        name: "session",
        summary: "Commands accepted inside `journal new`.",
        usage: "journal help session",
        details: &[
            "Editing: type <text>, newline, backspace, paste <markdown>, tab, time, date.",
            "Selection: select <from> <to> and cursor <at> take character offsets; top and bottom jump to either end.",
            "Styles: bold, italic, underline, strike, sub, sup, indent, unindent.",
            "Colours: color <name|#hex>, bg <name|#hex>, nocolor, nobg, colors, custom-color <title> <#hex>.",
            "Inspect: show, toolbar, spans, export. Menu: clear (asks to confirm), save, help, quit.",
            "Blank lines and lines starting with # are ignored, so scripts can carry comments.",
        ],
        flags: &[],
        aliases: &["commands"],
        section: Section::Guide,
        examples: &[
            "type Dear diary",
            "select 0 4",
            "bold",
        ],
    },
    HelpTopic {
        name: "styling",
        summary: "How the toolbar toggles decide which styles apply.",
        usage: "journal help styling",
        details: &[
            "Moving the cursor or selection sets each toggle to match the text under it.",
            "With a selection, a toggle click styles or unstyles exactly the selected characters; with a bare cursor it only changes what the next typed text gets.",
            "sub and sup exclude each other and shrink the text by JOURNAL_RELATIVE_SIZE.",
            "`paste` converts **bold**, *italic* and ~~strike~~ markdown into styles.",
        ],
        flags: &[],
        aliases: &["styles"],
        section: Section::Guide,
        examples: &["select 6 11", "italic", "toolbar"],
    },
    HelpTopic {
        name: "indent",
        summary: "Paragraph indentation and tabs.",
        usage: "journal help indent",
        details: &[
            "indent and unindent change the level of every paragraph touched by the selection, between 0 and 8.",
            "tab inserts JOURNAL_TAB_WIDTH spaces at the cursor.",
            "`export` prints the entry with each level rendered as JOURNAL_TAB_WIDTH leading spaces.",
        ],
        flags: &[],
        aliases: &["tabs"],
        section: Section::Guide,
        examples: &["indent", "export"],
    },
    HelpTopic {
        name: "JOURNAL_TAB_WIDTH",
        summary: "Spaces per tab and indent level (1-16, default 4).",
        usage: "JOURNAL_TAB_WIDTH=2 journal new",
        details: &["Out-of-range values fall back to 4 with a warning."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["JOURNAL_TAB_WIDTH=8 jn new"],
    },
    HelpTopic {
        name: "JOURNAL_RELATIVE_SIZE",
        summary: "Size factor for sub/superscript text (0 to 1, default 0.5).",
        usage: "JOURNAL_RELATIVE_SIZE=0.7 journal new",
        details: &["Values outside (0, 1] fall back to 0.5 with a warning."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["JOURNAL_RELATIVE_SIZE=0.75 jn new"],
    },
    HelpTopic {
        name: "JOURNAL_COLORS",
        summary: "Extra palette entries as Title=#RRGGBB, comma separated.",
        usage: "JOURNAL_COLORS=\"Sea=#2E8B57,Sand=#C2B280\" journal colors",
        details: &[
            "Entries are listed before the built-in colours; malformed ones are skipped with a warning.",
        ],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["JOURNAL_COLORS=\"Ink=#1B1B3A\" jn new"],
    },
    HelpTopic {
        name: "JOURNAL_LOG",
        summary: "Log filter for stderr diagnostics (default journal=warn).",
        usage: "JOURNAL_LOG=journal=debug journal new",
        details: &["Accepts tracing filter directives, e.g. `debug` or `journal::span=debug`."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["JOURNAL_LOG=debug jn new --script day.txt"],
    },
    HelpTopic {
        name: "NO_COLOR",
        summary: "Disable coloured output everywhere.",
        usage: "NO_COLOR=1 journal colors",
        details: &["Same effect as --plain; keeps output monochrome for piping."],
        flags: &[],
        aliases: &[],
        section: Section::Environment,
        examples: &["NO_COLOR=1 jn new"],
    },
];
