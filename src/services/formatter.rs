use crate::models::Answer;

/// Render an answer and its source links as the Markdown shown to the user.
pub fn format_answer(answer: &Answer, links: &[String]) -> String {
    let mut formatted = String::from("# Aqui está o que encontrei:\n\n");

    match answer {
        Answer::Structured(aggregated) => {
            formatted.push_str("## Fonte: Wikipedia\n");
            formatted.push_str(&aggregated.encyclopedia);
            formatted.push_str("\n\n");
            formatted.push_str("## Fontes da Web (Resumido em tópicos)\n");
            formatted.push_str(&aggregated.web);
            formatted.push_str("\n\n");
        }
        Answer::Plain(text) => formatted.push_str(text),
    }

    formatted.push_str("\n### Links das fontes:\n");
    for (idx, link) in links.iter().enumerate() {
        formatted.push_str(&format!("{}. [Visite o site]({})\n", idx + 1, link));
    }

    formatted
}
