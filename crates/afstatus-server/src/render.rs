//! HTML rendering for the status page.

use afstatus_core::summary::{BucketKind, Elapsed, Summary};

const BUCKETS: [(&str, BucketKind); 4] = [
  ("Teams", BucketKind::Teams),
  ("Serpentis", BucketKind::Serps),
  ("Angel / Sansha", BucketKind::Agents),
  ("Unknown", BucketKind::Unknown),
];

/// Status page for `key`. The waiting line appears only with an `elapsed`.
pub fn status_page(key: &str, summary: &Summary, elapsed: Option<Elapsed>) -> String {
  let key = escape(key);
  let mut body = format!(
    "<h1>{key}</h1>\n<p>{} outstanding contracts.</p>\n",
    summary.num_contracts
  );

  if let Some(e) = elapsed {
    body.push_str(&format!(
      "<p>The oldest contract has been waiting {} days, {} hours, {} minutes.</p>\n",
      e.days, e.hours, e.minutes
    ));
  }

  body.push_str("<table>\n<tr><th></th><th>Count</th><th>ISK (millions)</th></tr>\n");
  for (label, kind) in BUCKETS {
    let bucket = summary.bucket(kind);
    body.push_str(&format!(
      "<tr><th>{label}</th><td>{}</td><td>{}</td></tr>\n",
      bucket.count, bucket.isk
    ));
  }
  body.push_str("</table>\n");

  document(&format!("{key} contract status"), &body)
}

/// Shown before a site's first successful refresh.
pub fn pending_page(key: &str) -> String {
  let key = escape(key);
  document(
    &format!("{key} contract status"),
    &format!(
      "<h1>{key}</h1>\n<p>No data yet: this site is pending its first refresh.</p>\n"
    ),
  )
}

fn document(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
     <title>{title}</title>\n</head>\n<body>\n{body}</body>\n</html>\n"
  )
}

fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}
