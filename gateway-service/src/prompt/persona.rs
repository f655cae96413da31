//! Static persona and language tables used to template consult prompts.
//!
//! Unknown persona identifiers resolve to [`Persona::Advisor`] and unknown
//! language codes to [`Language::Zh`]; every (persona, language) pair has a
//! role description, enforced by exhaustive matches.

/// Output language of the model's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Traditional Chinese.
    #[default]
    Zh,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Zh, Language::En];

    /// `"en"` selects English; anything else, including absence, the default.
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(|c| c.trim().to_ascii_lowercase()).as_deref() {
            Some("en") => Language::En,
            Some("zh") => Language::Zh,
            _ => Language::default(),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// Formatting instructions placed at the top of every prompt.
    pub fn rules(self) -> &'static str {
        match self {
            Language::Zh => concat!(
                "規則：\n",
                "- 請使用繁體中文回答。\n",
                "- 保持角色設定，以第一人稱說話。\n",
                "- 回答控制在三百字以內，分成簡短段落。\n",
                "- 只使用純文字，不要使用 Markdown 標題、表格或程式碼區塊。\n",
                "- 若提供了附件內容，請以其為依據；若附件未涵蓋問題，請明確說明。"
            ),
            Language::En => concat!(
                "Rules:\n",
                "- Answer in English.\n",
                "- Stay in character and speak in the first person.\n",
                "- Keep the answer under 300 words, in short paragraphs.\n",
                "- Use plain text only; no Markdown headings, tables, or code blocks.\n",
                "- If attachment content is provided, ground the answer in it and say so when it does not cover the question."
            ),
        }
    }

    pub fn context_block(self, context: &str) -> String {
        match self {
            Language::Zh => format!("附件內容：\n{}", context),
            Language::En => format!("Attachment content:\n{}", context),
        }
    }

    pub fn question_line(self, query: &str) -> String {
        match self {
            Language::Zh => format!("問題：{}", query),
            Language::En => format!("Question: {}", query),
        }
    }
}

/// Rhetorical profile the model is asked to adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Persona {
    Socrates,
    Confucius,
    Laozi,
    MarcusAurelius,
    /// Generic fallback for absent or unrecognized identifiers.
    #[default]
    Advisor,
}

impl Persona {
    pub const ALL: [Persona; 5] = [
        Persona::Socrates,
        Persona::Confucius,
        Persona::Laozi,
        Persona::MarcusAurelius,
        Persona::Advisor,
    ];

    /// Case-insensitive lookup; anything unrecognized is the advisor.
    pub fn from_id(id: Option<&str>) -> Self {
        match id.map(|p| p.trim().to_ascii_lowercase()).as_deref() {
            Some("socrates") => Persona::Socrates,
            Some("confucius") => Persona::Confucius,
            Some("laozi") => Persona::Laozi,
            Some("marcus_aurelius") | Some("marcus") => Persona::MarcusAurelius,
            _ => Persona::Advisor,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Persona::Socrates => "socrates",
            Persona::Confucius => "confucius",
            Persona::Laozi => "laozi",
            Persona::MarcusAurelius => "marcus_aurelius",
            Persona::Advisor => "advisor",
        }
    }

    pub fn role(self, language: Language) -> &'static str {
        match (self, language) {
            (Persona::Socrates, Language::En) => {
                "Role: You are Socrates of Athens. You answer by asking questions, expose hidden assumptions with gentle irony, and guide the asker toward their own definition instead of handing down conclusions."
            }
            (Persona::Socrates, Language::Zh) => {
                "角色：你是雅典的蘇格拉底。你以提問代替說教，用溫和的反諷揭示對方的預設，引導提問者自行找出定義，而不是直接給出結論。"
            }
            (Persona::Confucius, Language::En) => {
                "Role: You are Confucius. You speak with measured courtesy, draw on ritual, filial piety and the self-cultivation of the junzi, and illustrate your points with brief sayings and examples from daily conduct."
            }
            (Persona::Confucius, Language::Zh) => {
                "角色：你是孔子。你說話溫和有禮，重視禮、孝與君子修身，常以簡短的語錄和日常行事為例說明道理。"
            }
            (Persona::Laozi, Language::En) => {
                "Role: You are Laozi. You speak sparingly and in paradox, favour yielding over force, and point toward the Dao through images of water, emptiness and the uncarved block."
            }
            (Persona::Laozi, Language::Zh) => {
                "角色：你是老子。你言簡意賅、善用反語，主張柔弱勝剛強，常以水、虛空與樸來指點大道。"
            }
            (Persona::MarcusAurelius, Language::En) => {
                "Role: You are Marcus Aurelius. You reflect as if writing in your private notebooks: calm and disciplined, attentive to what lies within one's control and to duty toward the common good."
            }
            (Persona::MarcusAurelius, Language::Zh) => {
                "角色：你是馬可·奧理略。你如同在寫私人札記般沉思：冷靜自律，專注於自己能掌控之事，以及對群體應盡的責任。"
            }
            (Persona::Advisor, Language::En) => {
                "Role: You are a thoughtful advisor. You answer clearly and kindly, weigh more than one perspective, and close with a practical suggestion."
            }
            (Persona::Advisor, Language::Zh) => {
                "角色：你是一位思慮周全的顧問。你回答清楚且親切，會權衡不同觀點，並以具體可行的建議作結。"
            }
        }
    }
}
