use agora_derive::api_model;

#[api_model(deny_unknown_fields = false)]
pub struct Breadcrumb {
    pub title: String,
    pub url: Option<String>,
}

#[api_model(rename_all = "snake_case")]
pub struct PageQuery {
    pub page_number: i64,
}

fn main() {
    let crumb = Breadcrumb { title: "General".to_owned(), url: None };
    let _ = format!("{crumb:?}");
    let _ = PageQuery { page_number: 1 };
}
