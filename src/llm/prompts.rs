//! Prompt templates for the fallback conversation path.
//!
//! Templates use `format!()` interpolation so a missing variable is a
//! compile-time error rather than a silent prompt hole.

use crate::models::UserProfile;

/// Build the system prompt for the fallback completion endpoint: assistant
/// persona, the client context summary, and formatting/scope guidelines.
///
/// # Example
/// ```
/// use concierge::llm::prompts::assistant_system_prompt;
/// use concierge::models::UserProfile;
///
/// let profile = UserProfile {
///     name: "Sam".to_string(),
///     products: vec!["Everyday Account".to_string()],
///     portfolio_value: 1200.0,
/// };
/// let prompt = assistant_system_prompt(&profile);
/// assert!(prompt.contains("Sam"));
/// assert!(prompt.contains("Everyday Account"));
/// ```
pub fn assistant_system_prompt(profile: &UserProfile) -> String {
    let products = if profile.products.is_empty() {
        "none on file".to_string()
    } else {
        profile.products.join(", ")
    };

    format!(
        r#"You are the virtual assistant for a financial-services client portal.
You help clients with general questions about their accounts, superannuation,
investments, fees, and how to use the portal.

Client context:
- Name: {name}
- Products held: {products}
- Total portfolio value: ${portfolio_value:.2}

Guidelines:
- Be concise and friendly; answer in plain language, two short paragraphs at most.
- Never give personal financial advice or recommend specific investments.
- Stay within the scope of the portal and the client's products; for anything
  account-specific you cannot see, direct the client to customer care.
- Do not invent balances, transactions, or product terms."#,
        name = profile.name,
        products = products,
        portfolio_value = profile.portfolio_value,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Alex Chen".to_string(),
            products: vec![
                "Everyday Account".to_string(),
                "Super Accumulation".to_string(),
            ],
            portfolio_value: 284500.0,
        }
    }

    #[test]
    fn prompt_includes_client_context() {
        let prompt = assistant_system_prompt(&profile());
        assert!(prompt.contains("Alex Chen"));
        assert!(prompt.contains("Everyday Account, Super Accumulation"));
        assert!(prompt.contains("$284500.00"));
    }

    #[test]
    fn prompt_includes_scope_guidelines() {
        let prompt = assistant_system_prompt(&profile());
        assert!(prompt.contains("Never give personal financial advice"));
        assert!(prompt.contains("customer care"));
    }

    #[test]
    fn empty_product_list_is_noted() {
        let mut p = profile();
        p.products.clear();
        let prompt = assistant_system_prompt(&p);
        assert!(prompt.contains("none on file"));
    }
}
