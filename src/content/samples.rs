//! Built-in sample posts used when no post data can be loaded

use super::Post;

/// The fallback post collection, in authoring order (unsorted)
pub fn sample_posts() -> Vec<Post> {
    vec![
        Post {
            id: 1,
            title: "Welcome to My Blog".to_string(),
            slug: "welcome-to-my-blog".to_string(),
            date: "2024-01-15".to_string(),
            excerpt: "This is my first blog post. Welcome to my simple, static blog built with HTML, CSS, and JavaScript.".to_string(),
            content: "# Welcome to My Blog\n\nThis is my first blog post on this simple, static blog. This blog is built using only HTML, CSS, and JavaScript, making it perfect for hosting on GitHub Pages.\n\n## Features\n\n- **Simple Management**: Add new posts by editing a JSON file\n- **GitHub Integration**: Easy to update using GitHub Desktop\n- **Responsive Design**: Works great on all devices\n- **Fast Loading**: Static files mean quick page loads\n\nI'm excited to share more content with you soon!".to_string(),
            tags: vec!["welcome", "blog", "introduction"].into_iter().map(String::from).collect(),
        },
        Post {
            id: 2,
            title: "How to Build a Static Blog".to_string(),
            slug: "how-to-build-static-blog".to_string(),
            date: "2024-01-20".to_string(),
            excerpt: "Learn how to create your own static blog using HTML, CSS, and JavaScript that you can easily host on GitHub Pages.".to_string(),
            content: "# How to Build a Static Blog\n\nBuilding a static blog has many advantages over traditional dynamic blogs. Here's why you should consider it:\n\n## Benefits of Static Blogs\n\n1. **Fast Performance**: No database queries or server processing\n2. **Better Security**: No server-side vulnerabilities\n3. **Free Hosting**: GitHub Pages hosts static sites for free\n4. **Version Control**: Your entire blog is version controlled\n\n## Technologies Used\n\n- **HTML**: Structure and content\n- **CSS**: Styling and responsive design\n- **JavaScript**: Dynamic functionality and post loading\n- **JSON**: Data storage for blog posts\n\nThis approach gives you full control over your blog while keeping it simple and maintainable.".to_string(),
            tags: vec!["tutorial", "web development", "static sites"].into_iter().map(String::from).collect(),
        },
        Post {
            id: 3,
            title: "Getting Started with GitHub Pages".to_string(),
            slug: "getting-started-github-pages".to_string(),
            date: "2024-01-25".to_string(),
            excerpt: "A beginner's guide to hosting your static website on GitHub Pages for free.".to_string(),
            content: "# Getting Started with GitHub Pages\n\nGitHub Pages is an excellent way to host static websites for free. Here's how to get started:\n\n## Step 1: Create a Repository\n\n1. Go to GitHub and create a new repository\n2. Name it `your-username.github.io` for a personal site\n3. Make sure it's public\n\n## Step 2: Add Your Files\n\n1. Upload your HTML, CSS, and JavaScript files\n2. Make sure you have an `index.html` file in the root\n3. Commit your changes\n\n## Step 3: Enable GitHub Pages\n\n1. Go to your repository settings\n2. Scroll down to GitHub Pages section\n3. Select your source branch (usually `main`)\n\nThat's it! Your site will be available at `https://your-username.github.io`".to_string(),
            tags: vec!["github", "hosting", "tutorial"].into_iter().map(String::from).collect(),
        },
    ]
}
