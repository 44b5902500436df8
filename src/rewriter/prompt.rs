use crate::entities::CATEGORIES;

/// Body characters sent to the model. Anything beyond is dropped silently.
pub const CONTENT_BUDGET_CHARS: usize = 3000;

pub const SYSTEM_PROMPT: &str = "Você é um jornalista esportivo brasileiro experiente. \
Reescreva artigos com palavras e estrutura completamente diferentes, mantendo as \
informações factuais. Responda SOMENTE com JSON válido, sem markdown.";

/// First `CONTENT_BUDGET_CHARS` characters of `content`, cut on a char
/// boundary.
pub fn truncate_content(content: &str) -> &str {
    match content.char_indices().nth(CONTENT_BUDGET_CHARS) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

pub fn user_prompt(title: &str, content: &str) -> String {
    format!(
        "Reescreva o artigo abaixo com título e conteúdo 100% originais em português brasileiro.\n\
         Classifique em UMA categoria: {categories}\n\
         \n\
         TÍTULO: {title}\n\
         \n\
         CONTEÚDO: {content}\n\
         \n\
         Responda com JSON: {{\"title\": \"novo título\", \"content\": \"conteúdo reescrito com parágrafos separados por \\n\\n\", \"category\": \"categoria\"}}",
        categories = CATEGORIES.join(", "),
        content = truncate_content(content),
    )
}
