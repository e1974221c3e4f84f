//! Deterministic replies used whenever the model is unavailable or its output
//! is rejected. Nothing here can fail or call the generator.

use super::context::{PageContext, ProductInfo};

/// Topics the seller fallback recognises, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerTopic {
    Greeting,
    Pricing,
    Stock,
    Shipping,
    Quality,
    Returns,
    Comparison,
    Thanks,
    General,
}

const SELLER_TOPICS: &[(SellerTopic, &[&str])] = &[
    (
        SellerTopic::Greeting,
        &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"],
    ),
    (
        SellerTopic::Pricing,
        &[
            "price",
            "prices",
            "pricing",
            "cost",
            "costs",
            "expensive",
            "cheap",
            "cheaper",
            "how much",
        ],
    ),
    (
        SellerTopic::Stock,
        &["stock", "available", "availability", "in stock", "out of stock"],
    ),
    (
        SellerTopic::Shipping,
        &[
            "shipping",
            "ship",
            "ships",
            "delivery",
            "deliver",
            "arrive",
            "when will it arrive",
        ],
    ),
    (
        SellerTopic::Quality,
        &[
            "quality",
            "good",
            "best",
            "spec",
            "specs",
            "specification",
            "specifications",
            "feature",
            "features",
        ],
    ),
    (
        SellerTopic::Returns,
        &["return", "returns", "refund", "refunds", "warranty", "guarantee"],
    ),
    (
        SellerTopic::Comparison,
        &["compare", "comparison", "difference", "better", "versus", "vs"],
    ),
    (SellerTopic::Thanks, &["thank", "thanks", "thank you", "thx"]),
];

/// Lower-cased words of the message. Letters, digits and apostrophes make up
/// a word, so "this" never matches "hi".
fn tokenize(message: &str) -> Vec<String> {
    message
        .to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|word| word.trim_matches('\''))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Single keywords at least this long also match inflected words, so "ship"
/// covers "shipped" and "return" covers "returnable".
const MIN_STEM_CHARS: usize = 4;

fn matches_stem(word: &str, keyword: &str) -> bool {
    if keyword.chars().count() >= MIN_STEM_CHARS {
        word.starts_with(keyword)
    } else {
        word == keyword
    }
}

/// True when any keyword appears in the message. Phrases must match as a run
/// of whole words; single keywords match by stem.
fn mentions_any(words: &[String], keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| {
        let phrase: Vec<&str> = keyword.split(' ').collect();
        match phrase.as_slice() {
            [single] => words.iter().any(|word| matches_stem(word, single)),
            _ => words
                .windows(phrase.len())
                .any(|window| window.iter().zip(&phrase).all(|(w, p)| w == p)),
        }
    })
}

pub fn classify_seller_message(message: &str) -> SellerTopic {
    let words = tokenize(message);
    SELLER_TOPICS
        .iter()
        .find(|(_, keywords)| mentions_any(&words, keywords))
        .map(|(topic, _)| *topic)
        .unwrap_or(SellerTopic::General)
}

pub fn seller_fallback(message: &str, product_info: &ProductInfo, store_name: &str) -> String {
    let name = product_info.name();

    match classify_seller_message(message) {
        SellerTopic::Greeting => match name {
            Some(name) => format!(
                "Hello! I see you're interested in the {name}. How can I help you with this product today?"
            ),
            None => format!(
                "Hello! Welcome to {store_name}. How can I assist you with your tech needs today?"
            ),
        },
        SellerTopic::Pricing => match product_info.price() {
            Some(price) => format!(
                "This product is priced at ${price}. It offers excellent value for its features. Would you like to know more about what's included?"
            ),
            None => "I'd be happy to discuss pricing. Which specific product are you interested in?"
                .to_string(),
        },
        SellerTopic::Stock => match product_info.stock() {
            Some(stock) if stock > 0 => format!(
                "Good news! This item is currently in stock with {stock} units available. Would you like to place an order?"
            ),
            Some(_) => "This item is currently out of stock. I can notify you when it becomes available again. Would you like me to do that?"
                .to_string(),
            None => "Let me check our current inventory for you. Which product are you asking about?"
                .to_string(),
        },
        SellerTopic::Shipping => "We offer fast shipping! Most orders ship within 1-2 business days and arrive within 2-5 business days. Free shipping is available on orders over $50."
            .to_string(),
        SellerTopic::Quality => match name {
            Some(name) => format!(
                "The {name} is a high-quality product. Would you like me to explain its key features and specifications?"
            ),
            None => "All our products are carefully selected for quality. What specific features are you looking for?"
                .to_string(),
        },
        SellerTopic::Returns => "We offer a 30-day return policy and full manufacturer warranty on all products. Your satisfaction is guaranteed!"
            .to_string(),
        SellerTopic::Comparison => "I'd be happy to help you compare products. What specific items are you considering, and what features matter most to you?"
            .to_string(),
        SellerTopic::Thanks => {
            "You're very welcome! Is there anything else I can help you with today?".to_string()
        }
        SellerTopic::General => match name {
            Some(name) => format!(
                "Thanks for your interest in the {name}! How can I help you learn more about this product?"
            ),
            None => format!(
                "Thank you for contacting {store_name}! I'm here to help with any questions about our tech products. What can I assist you with?"
            ),
        },
    }
}

pub fn helper_fallback(message: &str, page_context: &PageContext, store_name: &str) -> String {
    let words = tokenize(message);
    let path = page_context.current_page();

    if path == "/" || path == "/home" {
        if mentions_any(&words, &["product", "products", "shop", "buy", "browse"]) {
            return format!(
                "Welcome to {store_name}! You can browse our products by clicking 'Products' in the navigation menu. We specialize in PC components like graphics cards, processors, motherboards, and more. Use the search and filter options to find exactly what you need."
            );
        }
        if mentions_any(&words, &["help", "navigate", "how"]) {
            return format!(
                "I can help you navigate {store_name}! Use the top navigation to browse Products, or if you're a seller, you can access your dashboard. Need to find something specific? Try our search feature or product filters."
            );
        }
    }

    if path.contains("/products") {
        if mentions_any(&words, &["filter", "filters", "search", "find", "sort"]) {
            return "On the products page, you can filter by category, manufacturer, price range, and ratings. Use the search box to find specific items, and sort results by price, name, or date. Each product shows key specs and customer reviews."
                .to_string();
        }
        if mentions_any(&words, &["compare", "difference", "which"]) {
            return "To compare products, you can view individual product pages to see detailed specifications, reviews, and ratings. Look at the technical specifications section and customer feedback to make informed decisions."
                .to_string();
        }
    }

    if path.contains("/product/") {
        if let Some(name) = page_context.product_name() {
            if mentions_any(&words, &["price", "cost", "buy"]) {
                return format!(
                    "For the {name}, you can see the current price and availability on this page. Add it to your cart and proceed to checkout when you're ready to purchase."
                );
            }
            if mentions_any(&words, &["spec", "specs", "detail", "details", "feature", "features"]) {
                return format!(
                    "You're viewing the product details for {name}. Scroll down to see full specifications, customer reviews, and related product recommendations."
                );
            }
            if mentions_any(&words, &["review", "reviews", "rating", "ratings", "quality"]) {
                return "Customer reviews and ratings are shown below the product description. These provide real feedback from verified buyers about product quality, performance, and value."
                    .to_string();
            }
        }
    }

    if path.contains("/checkout") {
        return "On the checkout page, review your items, enter shipping information, and select your payment method. Make sure all details are correct before completing your order. You'll receive an email confirmation once your order is placed."
            .to_string();
    }

    if path.contains("/profile") {
        return "In your profile, you can update personal information, manage addresses, view order history, and adjust notification preferences. Keep your profile updated for the best shopping experience."
            .to_string();
    }

    if path.contains("/admin") || path.contains("/seller") {
        return "This is your dashboard where you can manage products, view orders, and access analytics. Use the navigation tabs to switch between different management functions."
            .to_string();
    }

    if mentions_any(&words, &["search", "find", "looking for"]) {
        return "Use the search box on the Products page to find items by name, then narrow the results with the category, brand, and price filters."
            .to_string();
    }

    if mentions_any(
        &words,
        &["account", "login", "log in", "register", "signup", "sign up"],
    ) {
        return "To create an account or log in, use the buttons in the top right corner. Having an account lets you track orders, save favorites, and get personalized recommendations."
            .to_string();
    }

    if mentions_any(&words, &["shipping", "delivery", "order", "orders"]) {
        return "We offer fast shipping with most orders shipping within 1-2 business days. You can track your orders in your profile under 'Order History'. Free shipping is available on orders over $50."
            .to_string();
    }

    if mentions_any(&words, &["return", "returns", "refund", "warranty"]) {
        return "We have a 30-day return policy for most items. Products come with manufacturer warranties. You can start a return process from your order history or contact our support team."
            .to_string();
    }

    if mentions_any(&words, &["payment", "pay", "secure", "safe"]) {
        return format!(
            "{store_name} uses secure payment processing. We accept major credit cards and ensure all transactions are encrypted and protected. Your payment information is never stored on our servers."
        );
    }

    format!(
        "I'm here to help you navigate {store_name}! I can assist with finding products, understanding features, account management, orders, and more. What specific information are you looking for?"
    )
}
