use owo_colors::OwoColorize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::api::ApiClient;
use crate::category::CategoryCode;
use crate::commands::confirm;
use crate::error::{DeskError, Result};
use crate::types::{FaqArticle, FaqPayload, Language};

/// A row in the knowledge-base table
#[derive(Tabled)]
struct FaqRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Lang")]
    language: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Auto")]
    auto_resolvable: String,
}

/// List knowledge-base articles
pub async fn cmd_faq_ls(client: &ApiClient, json: bool) -> Result<()> {
    let articles = client.list_faq().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
        return Ok(());
    }

    if articles.is_empty() {
        println!("No articles found.");
        return Ok(());
    }

    let rows: Vec<FaqRow> = articles.iter().map(faq_row).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
    println!("\n{} article(s)", articles.len());
    Ok(())
}

fn faq_row(article: &FaqArticle) -> FaqRow {
    let code = CategoryCode::decode(article.category_code.as_deref().unwrap_or(""));
    FaqRow {
        id: article.id,
        question: article.question.clone(),
        language: article.language.to_string(),
        category: code.main_label().unwrap_or("-").to_string(),
        code: if code.sub.is_empty() {
            "-".to_string()
        } else {
            code.sub.clone()
        },
        auto_resolvable: if article.auto_resolvable { "yes" } else { "no" }.to_string(),
    }
}

/// Create a knowledge-base article
pub async fn cmd_faq_add(
    client: &ApiClient,
    question: String,
    answer: String,
    language: Language,
    category_main: Option<String>,
    category_sub: Option<String>,
    auto_resolvable: bool,
) -> Result<()> {
    let category_code = CategoryCode::encode(
        category_main.as_deref().unwrap_or(""),
        category_sub.as_deref().unwrap_or(""),
    );

    let article = client
        .create_faq(&FaqPayload {
            question,
            answer,
            language,
            category_code,
            auto_resolvable,
        })
        .await?;

    println!("{} article #{}", "created".green(), article.id);
    Ok(())
}

pub struct FaqEditOptions {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub language: Option<Language>,
    pub category_main: Option<String>,
    pub category_sub: Option<String>,
    pub auto_resolvable: Option<bool>,
}

/// Edit an article. Unset flags keep the stored value; the category halves
/// are re-encoded from the merge of stored and given values, so clearing
/// the sub-code clears the whole code.
pub async fn cmd_faq_edit(client: &ApiClient, id: u64, options: FaqEditOptions) -> Result<()> {
    let articles = client.list_faq().await?;
    let current = articles
        .into_iter()
        .find(|a| a.id == id)
        .ok_or_else(|| DeskError::Other(format!("FAQ article #{} not found", id)))?;

    let stored = CategoryCode::decode(current.category_code.as_deref().unwrap_or(""));
    let main = options.category_main.unwrap_or(stored.main);
    let sub = options.category_sub.unwrap_or(stored.sub);

    let updated = client
        .update_faq(
            id,
            &FaqPayload {
                question: options.question.unwrap_or(current.question),
                answer: options.answer.unwrap_or(current.answer),
                language: options.language.unwrap_or(current.language),
                category_code: CategoryCode::encode(&main, &sub),
                auto_resolvable: options.auto_resolvable.unwrap_or(current.auto_resolvable),
            },
        )
        .await?;

    println!("{} article #{}", "updated".green(), updated.id);
    Ok(())
}

/// Delete an article, with a confirmation prompt unless forced
pub async fn cmd_faq_rm(client: &ApiClient, id: u64, force: bool) -> Result<()> {
    if !force && !confirm(&format!("Delete FAQ article #{}?", id))? {
        println!("aborted");
        return Ok(());
    }

    client.delete_faq(id).await?;
    println!("{} article #{}", "deleted".green(), id);
    Ok(())
}
