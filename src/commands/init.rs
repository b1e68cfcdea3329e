//! Initialize a new blog

use anyhow::Result;
use std::fs;
use std::path::Path;

const CONFIG_TEMPLATE: &str = r#"# Blog configuration

# Site
title: My Blog
description: My personal blog
url: http://localhost:4000

# Content
content_dir: content
extensions: [mdx, md]

# Front-matter fields every post is checked against
schema:
  fields:
    - name: title
      type: string
      required: true
    - name: publishedOn
      type: date
      required: true
    - name: abstract
      type: string

# What the homepage does with a post it cannot parse: skip | fail
listing:
  on_malformed: skip

# Code highlighting
highlight:
  theme: base16-ocean.dark
  line_number: true

# Markup element -> presentation component
components:
  pre: CodeSnippet

# Theme
color_theme_cookie: color-theme
default_color_mode: light
"#;

/// Initialize a new blog in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A blog already exists in {:?}", target_dir);
    }

    fs::create_dir_all(target_dir.join("content"))?;
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let now = chrono::Local::now();
    let sample_post = format!(
        r#"---
title: Hello World
publishedOn: {}
abstract: The very first post on this blog.
---

Welcome! This is your very first post.

## Quick Start

### Create a new post

```bash
$ halko-blog new "My New Post"
```

### Run server

```bash
$ halko-blog server
```
"#,
        now.format("%Y-%m-%dT%H:%M:%S%z")
    );

    fs::write(target_dir.join("content/hello-world.mdx"), sample_post)?;

    Ok(())
}
