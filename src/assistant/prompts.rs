use super::context::{PageContext, ProductInfo, truncate_with_ellipsis};

const DESCRIPTION_PREVIEW_CHARS: usize = 150;
const PAGE_CONTENT_PREVIEW_CHARS: usize = 300;

pub const HELPER_CUE: &str = "Answer:";

/// A rendered prompt and the marker after which the model's continuation begins.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    pub cue: String,
}

pub fn build_seller_prompt(
    message: &str,
    product_info: &ProductInfo,
    seller_name: &str,
    store_name: &str,
) -> Prompt {
    let system_prompt = format!(
        "You are {seller_name}, a professional customer service representative at {store_name}, \
an e-commerce platform specializing in PC components and technology products.

STRICT GUIDELINES:
- Be helpful, professional, and knowledgeable
- Focus ONLY on product information, sales, and customer service
- Keep responses concise (1-2 sentences max)
- Do NOT go off-topic or discuss unrelated subjects
- Always stay in character as a seller
- Provide accurate information about products when available"
    );

    let mut product_context = String::new();
    if !product_info.is_empty() {
        product_context.push_str("\nCURRENT PRODUCT CONTEXT:\n");
        if let Some(name) = product_info.name() {
            product_context.push_str(&format!("Product: {}\n", name));
        }
        if let Some(price) = product_info.price() {
            product_context.push_str(&format!("Price: ${}\n", price));
        }
        if let Some(category) = product_info.category() {
            product_context.push_str(&format!("Category: {}\n", category));
        }
        if let Some(description) = product_info.description() {
            product_context.push_str(&format!(
                "Description: {}\n",
                truncate_with_ellipsis(description, DESCRIPTION_PREVIEW_CHARS)
            ));
        }
        if let Some(stock) = product_info.stock() {
            let status = if stock > 0 { "Available" } else { "Out of stock" };
            product_context.push_str(&format!("Stock: {}\n", status));
        }
    }

    let cue = format!("{}:", seller_name);
    let text = format!("\n{system_prompt}{product_context}\n\nCustomer: {message}\n{cue} ");

    Prompt { text, cue }
}

pub fn build_helper_prompt(message: &str, page_context: &PageContext, store_name: &str) -> Prompt {
    let system_prompt = format!(
        "You are the website assistant for {store_name}, an online store for PC components \
and technology products. You help shoppers find their way around the site.

GUIDELINES:
- Answer in ONE short sentence
- Only talk about this website: products, navigation, orders, accounts, shipping and returns
- Point to the page or menu where the user can do what they ask
- Do NOT invent prices, policies, or features
- Never mention being an AI or a language model"
    );

    let mut page_block = String::new();
    if !page_context.is_empty() {
        page_block.push_str("\nCURRENT PAGE CONTEXT:\n");
        if !page_context.current_page().is_empty() {
            page_block.push_str(&format!("Page: {}\n", page_context.current_page()));
        }
        if let Some(title) = page_context.page_title() {
            page_block.push_str(&format!("Title: {}\n", title));
        }
        if let Some(content) = page_context.page_content() {
            page_block.push_str(&format!(
                "Page content: {}\n",
                truncate_with_ellipsis(content, PAGE_CONTENT_PREVIEW_CHARS)
            ));
        }
        if let Some(product) = page_context.product_info.as_ref() {
            if let Some(name) = product.name() {
                page_block.push_str(&format!("Product: {}\n", name));
            }
            if let Some(price) = product.price() {
                page_block.push_str(&format!("Price: ${}\n", price));
            }
        }
    }

    let text = format!("\n{system_prompt}{page_block}\n\nQuestion: {message}\n{HELPER_CUE} ");

    Prompt {
        text,
        cue: HELPER_CUE.to_string(),
    }
}
