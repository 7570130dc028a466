pub mod yahoo_news;
