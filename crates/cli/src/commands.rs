//! One function per screen of the original application.

use marquee_core::images::{image_url, ImageCategory, ImageSize};
use marquee_favorites::FavoriteRecord;
use marquee_query::{movie_keys, FetchOutcome, InfiniteQuery, ListRequest, SearchSession};
use marquee_tmdb::models::{Movie, MovieListKind, TrendingWindow};
use marquee_core::types::{MovieId, PersonId};

use crate::state::AppContext;

/// Home screen: the four rows, fetched concurrently like the screen
/// renders them. `--refresh` is pull-to-refresh: blocking refetch of
/// everything under the `movies` key prefix.
pub async fn home(ctx: &AppContext, refresh: bool, json: bool) -> anyhow::Result<()> {
    if refresh {
        ctx.query.refresh(&movie_keys::all()).await?;
    }

    let trending = ctx.query.infinite(ListRequest::Trending(TrendingWindow::Week));
    let now_playing = ctx.query.infinite(ListRequest::Movies(MovieListKind::NowPlaying));
    let popular = ctx.query.infinite(ListRequest::Movies(MovieListKind::Popular));
    let top_rated = ctx.query.infinite(ListRequest::Movies(MovieListKind::TopRated));

    let (trending, now_playing, popular, top_rated) = tokio::try_join!(
        trending.items(),
        now_playing.items(),
        popular.items(),
        top_rated.items(),
    )?;

    print_movies("Trending This Week", &trending, json);
    print_movies("Now Playing", &now_playing, json);
    print_movies("Popular", &popular, json);
    print_movies("Top Rated", &top_rated, json);
    Ok(())
}

/// One fixed list, paginated.
pub async fn list(
    ctx: &AppContext,
    kind: MovieListKind,
    pages: u32,
    json: bool,
) -> anyhow::Result<()> {
    let handle = ctx.query.infinite(ListRequest::Movies(kind));
    let movies = fetch_pages(&handle, pages).await?;
    print_movies(kind.as_str(), &movies, json);
    Ok(())
}

/// Trending for a day/week window, paginated.
pub async fn trending(
    ctx: &AppContext,
    window: TrendingWindow,
    pages: u32,
    json: bool,
) -> anyhow::Result<()> {
    let handle = ctx.query.infinite(ListRequest::Trending(window));
    let movies = fetch_pages(&handle, pages).await?;
    print_movies(&format!("Trending ({})", window.as_str()), &movies, json);
    Ok(())
}

/// Search screen: the query goes through the same debounced session
/// the text input uses, then further pages come straight off the
/// handle.
pub async fn search(ctx: &AppContext, query: &str, pages: u32, json: bool) -> anyhow::Result<()> {
    let session = SearchSession::new(ctx.query.clone());
    session.input(query).await;

    let Some(results) = session.next_results().await? else {
        return Ok(());
    };

    if results.query.trim().is_empty() {
        println!("Type something to search.");
        return Ok(());
    }
    if results.movies.is_empty() {
        println!("No results for \"{}\".", results.query);
        return Ok(());
    }

    let handle = ctx.query.search(&results.query);
    let movies = fetch_pages(&handle, pages).await?;
    print_movies(&format!("Results for \"{}\"", results.query), &movies, json);
    Ok(())
}

/// Movie detail screen: record, cast, videos and similar titles.
pub async fn movie(ctx: &AppContext, id: MovieId, json: bool) -> anyhow::Result<()> {
    let (details, credits, videos, similar) = tokio::try_join!(
        ctx.query.movie_details(id),
        ctx.query.movie_credits(id),
        ctx.query.movie_videos(id),
        ctx.query.similar_movies(id),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    println!("{} ({})", details.title, year(&details.release_date));
    if !details.tagline.is_empty() {
        println!("  {}", details.tagline);
    }
    println!("  Rating: {}", rating(details.vote_average));
    if let Some(runtime) = details.runtime {
        println!("  Runtime: {runtime} min");
    }
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        println!("  Genres: {}", genres.join(", "));
    }
    if let Some(poster) = image_url(
        &ctx.config.tmdb.image_base_url,
        ImageCategory::Poster,
        ImageSize::Large,
        details.poster_path.as_deref(),
    ) {
        println!("  Poster: {poster}");
    }
    if !details.overview.is_empty() {
        println!("\n{}", details.overview);
    }

    if !credits.cast.is_empty() {
        println!("\nCast:");
        for member in credits.cast.iter().take(10) {
            println!("  {:>8}  {} as {}", member.id, member.name, member.character);
        }
    }

    let trailers: Vec<_> = videos.iter().filter(|v| v.kind == "Trailer").collect();
    if !trailers.is_empty() {
        println!("\nTrailers:");
        for video in trailers {
            println!("  {} ({})", video.name, video.site);
        }
    }

    if !similar.is_empty() {
        print_movies("\nSimilar", &similar, false);
    }
    Ok(())
}

/// Person detail screen: biography and filmography.
pub async fn person(ctx: &AppContext, id: PersonId, json: bool) -> anyhow::Result<()> {
    let (detail, credits) = tokio::try_join!(
        ctx.query.person_detail(id),
        ctx.query.person_movie_credits(id),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&detail)?);
        return Ok(());
    }

    println!("{} - {}", detail.name, detail.known_for_department);
    if let Some(birthday) = &detail.birthday {
        println!("  Born: {birthday}");
    }
    if let Some(place) = &detail.place_of_birth {
        println!("  In: {place}");
    }
    if !detail.biography.is_empty() {
        println!("\n{}", detail.biography);
    }

    if !credits.cast.is_empty() {
        println!("\nKnown for:");
        for credit in credits.cast.iter().take(15) {
            println!(
                "  {:>8}  {} ({}) as {}",
                credit.id,
                credit.title,
                year(&credit.release_date),
                credit.character
            );
        }
    }
    Ok(())
}

/// Fetch the movie from the catalog and persist the local projection.
pub async fn fav_add(ctx: &AppContext, id: MovieId) -> anyhow::Result<()> {
    let details = ctx.query.movie_details(id).await?;
    let record = FavoriteRecord {
        id: details.id,
        title: details.title.clone(),
        poster_path: details.poster_path.clone(),
        release_date: details.release_date.clone(),
    };
    ctx.favorites.add(id, record).await?;
    println!("Added \"{}\" to favorites.", details.title);
    Ok(())
}

pub async fn fav_remove(ctx: &AppContext, id: MovieId) -> anyhow::Result<()> {
    ctx.favorites.remove(id).await?;
    println!("Removed {id} from favorites.");
    Ok(())
}

pub async fn fav_list(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let map = ctx.favorites.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    }

    if map.is_empty() {
        println!("No favorites yet.");
        return Ok(());
    }
    for record in map.values() {
        println!("  {:>8}  {} ({})", record.id, record.title, year(&record.release_date));
    }
    Ok(())
}

// ---- rendering helpers ----

/// Fetch up to `pages` pages through the handle and return the
/// concatenated items.
async fn fetch_pages(handle: &InfiniteQuery, pages: u32) -> anyhow::Result<Vec<Movie>> {
    let mut fetched = handle.pages().await?.len() as u32;
    while fetched < pages {
        match handle.fetch_next_page().await? {
            FetchOutcome::Fetched(_) => fetched += 1,
            FetchOutcome::AlreadyInFlight | FetchOutcome::NoMorePages => break,
        }
    }
    Ok(handle.items().await?)
}

fn print_movies(title: &str, movies: &[Movie], json: bool) {
    if json {
        match serde_json::to_string_pretty(movies) {
            Ok(body) => println!("{body}"),
            Err(e) => tracing::error!(error = %e, "failed to serialize movie list"),
        }
        return;
    }

    println!("{title}:");
    if movies.is_empty() {
        println!("  (nothing here)");
    }
    for movie in movies {
        println!(
            "  {:>8}  {} ({})  * {}",
            movie.id,
            movie.title,
            year(&movie.release_date),
            rating(movie.vote_average)
        );
    }
}

/// Release year, or a placeholder when the catalog has no date.
fn year(release_date: &str) -> &str {
    release_date.get(..4).unwrap_or("----")
}

/// A missing vote average renders as its own state, never as 0.0.
fn rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(avg) => format!("{avg:.1}"),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_extracts_the_leading_digits() {
        assert_eq!(year("2010-07-16"), "2010");
        assert_eq!(year(""), "----");
    }

    #[test]
    fn missing_rating_renders_distinctly() {
        assert_eq!(rating(Some(8.75)), "8.8");
        assert_eq!(rating(None), "n/a");
    }
}
