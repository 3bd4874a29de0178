use marks_db::models::BookmarkRow;

/// Escape user-supplied text for HTML body and attribute contexts.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Minimal page used for inline auth/owner failures ("Unauthorized",
/// "User not found") instead of bare status codes.
pub fn message_page(msg: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>My Bookmarks</title>\n</head>\n<body>\n\
         <p class=\"notice\">{}</p>\n</body>\n</html>\n",
        escape_html(msg)
    )
}

/// The dashboard: add form, bookmark list (edit/delete per row), pager.
/// Recomputed on every request, so mutations are visible on next navigation.
pub fn dashboard_page(rows: &[BookmarkRow], page: i64, total_pages: i64) -> String {
    let mut body = String::new();

    body.push_str("<nav class=\"topbar\"><span class=\"brand\">My Bookmarks</span></nav>\n");
    body.push_str(&create_form(page));

    body.push_str("<main class=\"container\">\n<h3>Your Bookmarks</h3>\n");

    if rows.is_empty() {
        body.push_str("<p class=\"empty\">No bookmarks yet.</p>\n");
    }

    body.push_str("<ul class=\"bookmarks\">\n");
    for row in rows {
        body.push_str(&bookmark_row(row, page));
    }
    body.push_str("</ul>\n");

    body.push_str(&pager(page, total_pages));
    body.push_str("</main>\n");

    page_shell(&body)
}

fn page_shell(body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>My Bookmarks</title>\n\
         <script src=\"/assets/bookmark-bus.js\" defer></script>\n\
         </head>\n<body>\n{}</body>\n</html>\n",
        body
    )
}

fn create_form(page: i64) -> String {
    format!(
        "<section class=\"add-bookmark\">\n<h5>Add Bookmark</h5>\n\
         <form method=\"post\" action=\"/dashboard/bookmarks\">\n\
         <input type=\"hidden\" name=\"page\" value=\"{page}\">\n\
         <label>Title <input name=\"title\" placeholder=\"Example: Google\" required></label>\n\
         <label>URL <input name=\"url\" placeholder=\"https://example.com\" required></label>\n\
         <button type=\"submit\">Add</button>\n\
         </form>\n</section>\n"
    )
}

fn bookmark_row(row: &BookmarkRow, page: i64) -> String {
    let id = escape_html(&row.id);
    let title = escape_html(&row.title);
    let url = escape_html(&row.url);

    format!(
        "<li class=\"bookmark\">\n\
         <div class=\"link\">\n<h6>{title}</h6>\n\
         <a href=\"{url}\" target=\"_blank\" rel=\"noopener noreferrer\">{url}</a>\n</div>\n\
         <details class=\"edit\">\n<summary>Edit</summary>\n\
         <form method=\"post\" action=\"/dashboard/bookmarks/update\">\n\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\n\
         <input type=\"hidden\" name=\"page\" value=\"{page}\">\n\
         <input name=\"title\" value=\"{title}\" required>\n\
         <input name=\"url\" value=\"{url}\" required>\n\
         <button type=\"submit\">Save</button>\n\
         </form>\n</details>\n\
         <form method=\"post\" action=\"/dashboard/bookmarks/delete\">\n\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\n\
         <input type=\"hidden\" name=\"page\" value=\"{page}\">\n\
         <button type=\"submit\" class=\"danger\">Delete</button>\n\
         </form>\n</li>\n"
    )
}

fn pager(page: i64, total_pages: i64) -> String {
    let mut nav = String::from("<nav class=\"pager\">\n");

    if page > 1 {
        nav.push_str(&format!(
            "<a href=\"/dashboard?page={}\">Previous</a>\n",
            page - 1
        ));
    }

    // Displayed page total is at least 1 even for an empty collection
    nav.push_str(&format!(
        "<span>Page {} of {}</span>\n",
        page,
        total_pages.max(1)
    ));

    if page < total_pages {
        nav.push_str(&format!("<a href=\"/dashboard?page={}\">Next</a>\n", page + 1));
    }

    nav.push_str("</nav>\n");
    nav
}
