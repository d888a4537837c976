// src/render/pages.rs

//! Page templates.
//!
//! Each function returns a complete HTML document. Templates never fetch;
//! callers pass in already-selected content.

use std::fmt::Write;

use super::html::{escape, external_link, image, link, paragraphs, tag_list};
use super::rich_text::{render_document, render_toc, toc};
use crate::models::{Article, Experience, Profile, Project, SiteConfig};
use crate::pipeline::filter::{Facet, ListingQuery, category_options, filter_items, status_options};
use crate::pipeline::view_state::{SectionTracker, ShowMore, Theme};
use crate::utils::url::{absolute, is_safe_href};

/// Site-wide values every page needs.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub site: &'a SiteConfig,
    pub theme: Theme,
}

impl<'a> PageContext<'a> {
    pub fn new(site: &'a SiteConfig) -> Self {
        Self {
            site,
            theme: Theme::from_dark(site.dark_theme),
        }
    }
}

/// Metadata for the document head.
struct Head<'a> {
    title: &'a str,
    description: &'a str,
    path: &'a str,
    /// Overrides the canonical URL derived from `path`
    canonical: Option<&'a str>,
}

fn layout(ctx: &PageContext<'_>, head: Head<'_>, body: &str) -> String {
    let full_title = if head.title.is_empty() || head.title == ctx.site.title {
        ctx.site.title.clone()
    } else {
        format!("{} | {}", head.title, ctx.site.title)
    };
    let canonical = head
        .canonical
        .map(str::to_string)
        .unwrap_or_else(|| absolute(&ctx.site.base_url, head.path));

    let mut out = String::with_capacity(body.len() + 1024);
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\" data-theme=\"{theme}\">\n<head>\
         <meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title}</title>\
         <meta name=\"description\" content=\"{description}\">\
         <link rel=\"canonical\" href=\"{canonical}\">\
         </head>\n<body>",
        theme = ctx.theme,
        title = escape(&full_title),
        description = escape(head.description),
        canonical = escape(&canonical),
    );
    let _ = write!(
        out,
        "<header class=\"site-header\"><a class=\"site-title\" href=\"/\">{}</a>\
         <nav class=\"site-nav\">{}{}</nav>\
         <button type=\"button\" class=\"theme-toggle\" data-next-theme=\"{}\" aria-label=\"Toggle theme\"></button>\
         </header>",
        escape(&ctx.site.title),
        nav_link("/projects", "Projects", head.path),
        nav_link("/articles", "Articles", head.path),
        ctx.theme.toggle(),
    );
    let _ = write!(out, "<main>{body}</main>");
    let _ = write!(
        out,
        "<footer class=\"site-footer\"><p>{}</p></footer>\n</body>\n</html>\n",
        escape(&ctx.site.title)
    );
    out
}

fn nav_link(href: &str, label: &str, current: &str) -> String {
    if current == href || current.starts_with(&format!("{href}/")) {
        format!(
            "<a href=\"{href}\" aria-current=\"page\">{}</a>",
            escape(label)
        )
    } else {
        link(href, label)
    }
}

// --- Home ---

/// Home page: intro, work history, featured projects, latest articles and
/// contact links.
pub fn home_page(
    ctx: &PageContext<'_>,
    profile: &Profile,
    featured: &[Project],
    articles: &[Article],
    tracker: &SectionTracker,
) -> String {
    let mut body = String::new();

    body.push_str("<nav class=\"section-nav\">");
    for section in tracker.sections() {
        let active = if tracker.is_active(section) {
            " class=\"active\" aria-current=\"true\""
        } else {
            ""
        };
        let _ = write!(
            body,
            "<a href=\"#{id}\"{active} aria-label=\"Navigate to {id}\"></a>",
            id = escape(section)
        );
    }
    body.push_str("</nav>");

    intro_section(&mut body, profile);
    work_section(&mut body, profile);
    featured_section(&mut body, featured, ctx.site.featured_limit);
    thoughts_section(&mut body, articles, ctx.site.latest_articles);
    connect_section(&mut body, profile);

    layout(
        ctx,
        Head {
            title: &ctx.site.title,
            description: &profile.headline,
            path: "/",
            canonical: None,
        },
        &body,
    )
}

fn intro_section(body: &mut String, profile: &Profile) {
    let (first, rest) = profile.name_parts();
    let _ = write!(
        body,
        "<header id=\"intro\" class=\"section\"><h1>{}<br><span class=\"muted\">{}</span></h1>\
         <p class=\"headline\">{}</p>",
        escape(first),
        escape(rest),
        escape(&profile.headline)
    );
    if let Some(availability) = profile.availability.as_deref() {
        let _ = write!(body, "<p class=\"availability\">{}</p>", escape(availability));
    }
    if !profile.location.is_empty() {
        let _ = write!(body, "<p class=\"location\">{}</p>", escape(&profile.location));
    }
    for paragraph in &profile.bio {
        let _ = write!(body, "<p>{}</p>", escape(paragraph));
    }
    body.push_str(&tag_list("skills", &profile.skills));
    body.push_str("</header>");
}

fn work_section(body: &mut String, profile: &Profile) {
    body.push_str("<section id=\"work\" class=\"section\"><h2>Selected Work</h2>");
    for job in &profile.experience {
        experience_entry(body, job);
    }
    if !profile.education.is_empty() {
        body.push_str("<h3>Education</h3>");
        for entry in &profile.education {
            experience_entry(body, entry);
        }
    }
    body.push_str("</section>");
}

fn experience_entry(body: &mut String, job: &Experience) {
    let _ = write!(
        body,
        "<article class=\"experience\"><span class=\"period\">{}</span>\
         <h3>{}</h3><p class=\"company\">{}</p>",
        escape(&job.period),
        escape(&job.title),
        escape(&job.company)
    );
    if !job.description.is_empty() {
        let _ = write!(body, "<p>{}</p>", escape(&job.description));
    }
    body.push_str(&tag_list("tech", &job.technologies));
    body.push_str("</article>");
}

fn featured_section(body: &mut String, featured: &[Project], limit: usize) {
    let more = ShowMore::new(limit);
    body.push_str("<section id=\"projects\" class=\"section\"><h2>Past Projects / Highlights</h2>");
    body.push_str("<div class=\"project-grid\">");
    for project in more.visible(featured) {
        body.push_str(&project_card(project));
    }
    body.push_str("</div>");
    let hidden = more.hidden_count(featured.len());
    if hidden > 0 {
        let _ = write!(
            body,
            "<p class=\"show-more\"><a href=\"/projects\">Show {hidden} more</a></p>"
        );
    }
    body.push_str("<p><a href=\"/projects\">View all projects</a></p></section>");
}

fn thoughts_section(body: &mut String, articles: &[Article], limit: usize) {
    body.push_str("<section id=\"thoughts\" class=\"section\"><h2>Recent Thoughts</h2>");
    if articles.is_empty() {
        body.push_str("<p class=\"empty\">No articles yet.</p>");
    }
    for article in articles.iter().take(limit) {
        body.push_str(&article_card(article));
    }
    body.push_str("<p><a href=\"/articles\">All articles</a></p></section>");
}

fn connect_section(body: &mut String, profile: &Profile) {
    body.push_str("<section id=\"connect\" class=\"section\"><h2>Let's Connect</h2>");
    if let Some(email) = profile.email.as_deref() {
        let _ = write!(
            body,
            "<p class=\"email\">{}</p>",
            link(&format!("mailto:{email}"), email)
        );
        contact_form(body, email);
    }
    body.push_str("<ul class=\"links\">");
    for social in &profile.links {
        let _ = write!(body, "<li>{}</li>", external_link(&social.url, &social.label));
    }
    body.push_str("</ul></section>");
}

/// Message form handed to the visitor's mail client. Only `subject` and
/// `body` are read by `mailto:` handlers.
fn contact_form(body: &mut String, email: &str) {
    let _ = write!(
        body,
        "<form class=\"contact-form\" action=\"{}\" method=\"get\">\
         <h3>Send a Message</h3>\
         <label for=\"contact-name\">Name</label>\
         <input id=\"contact-name\" name=\"name\" placeholder=\"Your name\" required>\
         <label for=\"contact-email\">Email</label>\
         <input id=\"contact-email\" name=\"email\" type=\"email\" placeholder=\"your.email@example.com\" required>\
         <label for=\"contact-subject\">Subject</label>\
         <input id=\"contact-subject\" name=\"subject\" placeholder=\"What is this regarding?\" required>\
         <label for=\"contact-message\">Message</label>\
         <textarea id=\"contact-message\" name=\"body\" rows=\"5\" placeholder=\"Your message here...\" required></textarea>\
         <button type=\"submit\">Send Message</button>\
         </form>",
        escape(&format!("mailto:{email}"))
    );
}

// --- Projects ---

/// Summary card linking to a project's detail page.
pub fn project_card(project: &Project) -> String {
    let mut out = format!(
        "<article class=\"project-card\" data-slug=\"{}\">",
        escape(&project.slug)
    );
    if let Some(src) = project.image.as_deref() {
        out.push_str(&image(src, project.image_alt.as_deref().unwrap_or(&project.title)));
    }
    out.push_str("<div class=\"meta\">");
    if let Some(year) = project.display_year() {
        let _ = write!(out, "<span class=\"year\">{}</span>", escape(year));
    }
    if !project.status.is_empty() {
        let _ = write!(out, "<span class=\"status\">{}</span>", escape(project.status.label()));
    }
    out.push_str("</div>");
    let _ = write!(
        out,
        "<h3>{}</h3><p>{}</p>",
        link(&project.href(), &project.title),
        escape(&project.description)
    );
    out.push_str(&tag_list("tech", &project.technologies));
    out.push_str("</article>");
    out
}

fn facet_links(out: &mut String, label: &str, options: &[String], selected: &str, href: impl Fn(&str) -> String) {
    let _ = write!(out, "<div class=\"facet\"><span class=\"facet-label\">{}</span>", escape(label));
    for option in options {
        let target = href(option);
        if option == selected {
            let _ = write!(
                out,
                "<a class=\"active\" aria-current=\"true\" href=\"{}\">{}</a>",
                escape(&target),
                escape(option)
            );
        } else {
            out.push_str(&link(&target, option));
        }
    }
    out.push_str("</div>");
}

fn search_form(out: &mut String, action: &str, query: &ListingQuery) {
    let _ = write!(out, "<form class=\"search\" method=\"get\" action=\"{}\">", escape(action));
    if !query.category.is_all() {
        let _ = write!(
            out,
            "<input type=\"hidden\" name=\"category\" value=\"{}\">",
            escape(query.category.as_str())
        );
    }
    if !query.status.is_all() {
        let _ = write!(
            out,
            "<input type=\"hidden\" name=\"status\" value=\"{}\">",
            escape(query.status.as_str())
        );
    }
    let _ = write!(
        out,
        "<input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search...\"></form>",
        escape(&query.search)
    );
}

/// Projects listing with facets applied.
pub fn projects_page(ctx: &PageContext<'_>, projects: &[Project], query: &ListingQuery) -> String {
    let visible = filter_items(projects, query);
    let mut body = String::from("<h1>All Projects</h1><div class=\"filters\">");

    search_form(&mut body, "/projects", query);
    facet_links(
        &mut body,
        "Category",
        &category_options(projects),
        query.category.as_str(),
        |c| format!("/projects{}", query.with_category(c).to_query_string()),
    );
    facet_links(
        &mut body,
        "Status",
        &status_options(projects),
        query.status.as_str(),
        |s| format!("/projects{}", query.with_status(s).to_query_string()),
    );
    body.push_str("</div>");

    let _ = write!(
        body,
        "<p class=\"result-count\">Showing {} of {} projects</p>",
        visible.len(),
        projects.len()
    );

    if visible.is_empty() {
        body.push_str(
            "<div class=\"empty-state\"><p>No projects found matching your criteria.</p>\
             <a class=\"clear-filters\" href=\"/projects\">Clear all filters</a></div>",
        );
    } else {
        body.push_str("<div class=\"project-grid\">");
        for project in &visible {
            body.push_str(&project_card(project));
        }
        body.push_str("</div>");
    }

    let title = match &query.category {
        Facet::Only(category) => format!("{category} Projects"),
        Facet::All => "Projects".to_string(),
    };
    layout(
        ctx,
        Head {
            title: &title,
            description: "Projects, experiments and case studies",
            path: "/projects",
            canonical: None,
        },
        &body,
    )
}

/// Project detail page.
pub fn project_page(ctx: &PageContext<'_>, project: &Project) -> String {
    let mut body = String::from("<p class=\"back\"><a href=\"/projects\">Back to Projects</a></p>");
    let _ = write!(body, "<article class=\"project\"><header><div class=\"meta\">");
    if let Some(year) = project.display_year() {
        let _ = write!(body, "<span class=\"year\">{}</span>", escape(year));
    }
    if !project.status.is_empty() {
        let _ = write!(body, "<span class=\"status\">{}</span>", escape(project.status.label()));
    }
    if !project.category.is_empty() {
        let _ = write!(body, "<span class=\"category\">{}</span>", escape(&project.category));
    }
    let _ = write!(
        body,
        "</div><h1>{}</h1><p class=\"lead\">{}</p>",
        escape(&project.title),
        escape(&project.description)
    );

    body.push_str("<p class=\"links\">");
    if let Some(live) = project.primary_link() {
        body.push_str(&external_link(live, "Live Demo"));
    }
    if let Some(github) = project.github_url.as_deref().filter(|u| !u.trim().is_empty()) {
        body.push_str(&external_link(github, "View Code"));
    }
    body.push_str("</p></header>");

    if let Some(src) = project.image.as_deref() {
        let _ = write!(
            body,
            "<figure class=\"hero\">{}</figure>",
            image(src, project.image_alt.as_deref().unwrap_or(&project.title))
        );
    }

    if let Some(long) = project.long_description.as_deref() {
        let _ = write!(body, "<section class=\"overview\"><h2>Overview</h2>{}</section>", paragraphs(long));
    }
    if !project.technologies.is_empty() {
        let _ = write!(
            body,
            "<section class=\"technologies\"><h2>Technologies Used</h2>{}</section>",
            tag_list("tech", &project.technologies)
        );
    }
    if !project.gallery.is_empty() {
        body.push_str("<section class=\"gallery\"><h2>Gallery</h2>");
        for (i, src) in project.gallery.iter().enumerate() {
            body.push_str(&image(src, &format!("{} screenshot {}", project.title, i + 1)));
        }
        body.push_str("</section>");
    }
    if !project.features.is_empty() {
        let _ = write!(
            body,
            "<section class=\"features\"><h2>Key Features</h2>{}</section>",
            tag_list("feature-list", &project.features)
        );
    }
    if let Some(challenges) = project.challenges.as_deref() {
        let _ = write!(body, "<section class=\"challenges\"><h2>Challenges</h2>{}</section>", paragraphs(challenges));
    }
    if let Some(learnings) = project.learnings.as_deref() {
        let _ = write!(body, "<section class=\"learnings\"><h2>Key Learnings</h2>{}</section>", paragraphs(learnings));
    }
    body.push_str("</article>");

    if !project.related_projects.is_empty() {
        body.push_str("<section class=\"related\"><h2>Related Projects</h2><div class=\"project-grid\">");
        for related in &project.related_projects {
            body.push_str(&project_card(related));
        }
        body.push_str("</div></section>");
    }

    layout(
        ctx,
        Head {
            title: &project.title,
            description: &project.description,
            path: &project.href(),
            canonical: None,
        },
        &body,
    )
}

// --- Articles ---

fn article_card(article: &Article) -> String {
    let mut out = format!(
        "<article class=\"article-card\" data-slug=\"{}\"><div class=\"meta\">",
        escape(&article.slug)
    );
    if let Some(date) = article.display_date() {
        let _ = write!(out, "<time>{}</time>", escape(&date));
    }
    let _ = write!(
        out,
        "<span class=\"read-time\">{}</span></div><h3>{}</h3><p>{}</p>",
        escape(&article.read_time_label()),
        link(&article.href(), &article.title),
        escape(&article.excerpt)
    );
    out.push_str("</article>");
    out
}

/// Articles listing. The category facet matches tags.
pub fn articles_page(ctx: &PageContext<'_>, articles: &[Article], query: &ListingQuery) -> String {
    let visible = filter_items(articles, query);
    let mut body = String::from("<h1>Articles</h1><div class=\"filters\">");
    search_form(&mut body, "/articles", query);
    facet_links(
        &mut body,
        "Tag",
        &category_options(articles),
        query.category.as_str(),
        |t| format!("/articles{}", query.with_category(t).to_query_string()),
    );
    body.push_str("</div>");

    if visible.is_empty() {
        body.push_str(
            "<div class=\"empty-state\"><p>No articles found.</p>\
             <a class=\"clear-filters\" href=\"/articles\">Clear all filters</a></div>",
        );
    } else {
        for article in &visible {
            body.push_str(&article_card(article));
        }
    }

    layout(
        ctx,
        Head {
            title: "Articles",
            description: "Writing on software, design and the web",
            path: "/articles",
            canonical: None,
        },
        &body,
    )
}

/// Article detail page with table of contents.
pub fn article_page(ctx: &PageContext<'_>, article: &Article) -> String {
    let mut body = String::from("<p class=\"back\"><a href=\"/articles\">Back to Articles</a></p>");
    body.push_str("<article class=\"article\"><header>");
    body.push_str(&tag_list("tags", &article.tags));
    let _ = write!(
        body,
        "<h1>{}</h1><p class=\"lead\">{}</p><div class=\"meta\">",
        escape(&article.title),
        escape(&article.excerpt)
    );
    if let Some(date) = article.display_date() {
        let _ = write!(body, "<time>{}</time>", escape(&date));
    }
    let _ = write!(
        body,
        "<span class=\"read-time\">{}</span></div>",
        escape(&article.read_time_label())
    );

    if !article.author.name.is_empty() {
        body.push_str("<div class=\"author\">");
        if let Some(avatar) = article.author.avatar.as_deref() {
            body.push_str(&image(avatar, &article.author.name));
        }
        let _ = write!(body, "<span class=\"author-name\">{}</span></div>", escape(&article.author.name));
    }
    if let Some(external) = article.external_url.as_deref() {
        let _ = write!(
            body,
            "<p class=\"canonical\">Originally published at {}</p>",
            external_link(external, external)
        );
    }
    body.push_str("</header>");

    body.push_str(&render_toc(&toc(&article.body)));
    let _ = write!(body, "<div class=\"prose\">{}</div></article>", render_document(&article.body));

    let path = article.href();
    let canonical = article
        .external_url
        .as_deref()
        .filter(|u| is_safe_href(u));
    layout(
        ctx,
        Head {
            title: &article.title,
            description: &article.excerpt,
            path: &path,
            canonical,
        },
        &body,
    )
}

// --- Not found ---

/// Not-found page with a way back to the relevant listing.
pub fn not_found_page(ctx: &PageContext<'_>, message: &str, back_href: &str, back_label: &str) -> String {
    let body = format!(
        "<section class=\"not-found\"><h1>Not Found</h1><p>{}</p><p>{}</p></section>",
        escape(message),
        link(back_href, back_label)
    );
    layout(
        ctx,
        Head {
            title: "Not Found",
            description: message,
            path: "/404",
            canonical: None,
        },
        &body,
    )
}
