use crate::research::llm::model_provider::ChatMessage;

// The three call sites share the message shape but not the persona: the two
// report operations speak to a financial analyst, the news operation to an
// economist.
pub const ANALYST_ROLE : &'static str = "You are a financial analyst.";
pub const ECONOMIST_ROLE : &'static str = "You are an economist summarizing business news.";

pub fn summary_messages(report_text: &str) -> Vec<ChatMessage> {
  let user_prompt : String = format!("Summarize this financial report for an investor:\n{}", report_text);

  return vec![
    ChatMessage{ role: "system".to_string(), content: ANALYST_ROLE.to_string()},
    ChatMessage{ role: "user".to_string(), content: user_prompt}
  ];
}

pub fn question_messages(report_text: &str, question: &str) -> Vec<ChatMessage> {
  let user_prompt : String = format!("Based on this report:\n{}\nAnswer this: {}", report_text, question);

  return vec![
    ChatMessage{ role: "system".to_string(), content: ANALYST_ROLE.to_string()},
    ChatMessage{ role: "user".to_string(), content: user_prompt}
  ];
}

pub fn news_messages(query: &str) -> Vec<ChatMessage> {
  let user_prompt : String = format!("Find and summarize latest macroeconomic and industry news about: {}", query);

  return vec![
    ChatMessage{ role: "system".to_string(), content: ECONOMIST_ROLE.to_string()},
    ChatMessage{ role: "user".to_string(), content: user_prompt}
  ];
}

pub fn news_search_link(query: &str) -> String {
  return format!("https://www.google.com/search?q={}+site:news.google.com", query);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::research::report::extract::truncate_for_prompt;

  #[test]
  fn summary_prompt_carries_the_report_text() {
    let messages = summary_messages("Revenue was flat.");
    assert_eq!(messages[0].role, "system");
    assert_eq!(messages[0].content, ANALYST_ROLE);
    assert_eq!(messages[1].role, "user");
    assert_eq!(messages[1].content, "Summarize this financial report for an investor:\nRevenue was flat.");
  }

  #[test]
  fn question_prompt_carries_report_and_question() {
    let messages = question_messages("Debt fell.", "What happened to debt?");
    assert_eq!(messages[1].content, "Based on this report:\nDebt fell.\nAnswer this: What happened to debt?");
  }

  #[test]
  fn news_prompt_uses_the_economist_persona() {
    let messages = news_messages("semiconductors");
    assert_eq!(messages[0].content, ECONOMIST_ROLE);
    assert_eq!(messages[1].content, "Find and summarize latest macroeconomic and industry news about: semiconductors");
  }

  #[test]
  fn news_link_points_at_google_news() {
    assert_eq!(news_search_link("semiconductors"), "https://www.google.com/search?q=semiconductors+site:news.google.com");
  }

  #[test]
  fn a_generated_prompt_holds_exactly_the_first_4000_report_characters() {
    let extracted: String = "x".repeat(10_000);
    let truncated: String = truncate_for_prompt(&extracted);
    let messages = summary_messages(&truncated);

    let expected: String = extracted.chars().take(4000).collect();
    assert!(messages[1].content.ends_with(&expected));
    // Nothing beyond the limit leaks into the prompt.
    assert_eq!(messages[1].content.matches('x').count(), 4000);
  }
}
