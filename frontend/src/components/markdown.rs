use pulldown_cmark::{Options, Parser, html};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MarkdownProps {
    pub content: String,
}

#[function_component(Markdown)]
pub fn markdown(props: &MarkdownProps) -> Html {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(&props.content, options);
    let mut rendered = String::new();
    html::push_html(&mut rendered, parser);

    let node = Html::from_html_unchecked(AttrValue::from(rendered));
    html! { <div class="markdown-body">{node}</div> }
}
